//! Structured key/value context

use serde::Serialize;
use serde_json::Value;

/// A user defined log field
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name
    pub key: String,
    /// Field value
    pub value: Value,
}

impl Field {
    /// Create a field from anything convertible into a JSON value
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a field from any serializable value
    ///
    /// Values that fail to serialize are recorded as their error message.
    pub fn any(key: impl Into<String>, value: &impl Serialize) -> Self {
        let value =
            serde_json::to_value(value).unwrap_or_else(|e| Value::String(format!("!ERROR: {e}")));
        Self {
            key: key.into(),
            value,
        }
    }
}

impl<K: Into<String>, V: Into<Value>> From<(K, V)> for Field {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}
