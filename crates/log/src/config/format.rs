//! Encoder configuration

use serde::{Deserialize, Serialize};

/// Log format configuration
///
/// Empty keys fall back to single-letter defaults (`T`, `L`, `N`, `C`, `M`,
/// `S`). An empty `function_key` omits the function field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Empty, `seconds`, `milliseconds`, `nanoseconds` or a `time` format
    /// description such as `[year]-[month]-[day]`
    pub time_format: String,

    /// Time key
    pub time_key: String,
    /// Level key
    pub level_key: String,
    /// Logger name key
    pub name_key: String,
    /// Caller key
    pub caller_key: String,
    /// Function key, empty disables the field
    pub function_key: String,
    /// Message key
    pub message_key: String,
    /// Stacktrace key
    pub stacktrace_key: String,
}
