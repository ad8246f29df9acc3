//! Line-delimited JSON encoder

use std::io;

use serde_json::{Map, Value};

use super::{Encoder, EncoderConfig};
use crate::config::FormatConfig;
use crate::core::LogResult;
use crate::field::Field;
use crate::sink::Record;

/// Prefix given to user fields whose key collides with a record entry
pub const FIELD_PREFIX: &str = "fields.";

/// One JSON object per record
#[derive(Debug, Clone)]
pub struct JsonEncoder {
    config: EncoderConfig,
}

impl JsonEncoder {
    /// Create from a format configuration
    pub fn new(cfg: &FormatConfig, enable_color: bool) -> LogResult<Self> {
        Ok(Self {
            config: EncoderConfig::new(cfg, enable_color)?,
        })
    }
}

impl Encoder for JsonEncoder {
    fn encode(&self, record: &Record<'_>, context: &[Field], buf: &mut Vec<u8>) -> LogResult<()> {
        let keys = &self.config.keys;
        let mut obj = Map::new();

        obj.insert(keys.level.clone(), self.config.level.encode(record.level).into());
        obj.insert(keys.time.clone(), self.config.time.encode(record.time));
        if let Some(name) = record.logger_name.filter(|n| !n.is_empty()) {
            obj.insert(keys.name.clone(), name.into());
        }
        if let Some(caller) = record.caller {
            obj.insert(keys.caller.clone(), caller.to_string().into());
        }
        if let (Some(key), Some(function)) = (&keys.function, record.function) {
            obj.insert(key.clone(), function.into());
        }
        obj.insert(keys.message.clone(), record.message.into());

        // user fields never replace record entries
        for field in context.iter().chain(record.fields) {
            let key = if keys.is_reserved(&field.key) {
                format!("{FIELD_PREFIX}{}", field.key)
            } else {
                field.key.clone()
            };
            obj.insert(key, field.value.clone());
        }

        if let Some(stack) = record.stacktrace.filter(|s| !s.is_empty()) {
            obj.insert(keys.stacktrace.clone(), Value::from(stack));
        }

        serde_json::to_writer(&mut *buf, &obj).map_err(io::Error::from)?;
        buf.push(b'\n');
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use crate::sink::Caller;
    use pretty_assertions::assert_eq;

    fn encode(enc: &JsonEncoder, record: &Record<'_>, context: &[Field]) -> Map<String, Value> {
        let mut buf = Vec::new();
        enc.encode(record, context, &mut buf).unwrap();
        assert_eq!(buf.last(), Some(&b'\n'));
        serde_json::from_slice(&buf).unwrap()
    }

    #[test]
    fn default_keys() {
        let enc = JsonEncoder::new(
            &FormatConfig {
                time_format: "nanoseconds".to_string(),
                ..FormatConfig::default()
            },
            false,
        )
        .unwrap();
        let record = Record {
            logger_name: Some("api"),
            caller: Some(Caller {
                file: "src/main.rs",
                line: 7,
            }),
            function: Some("api::main"),
            ..Record::new(Level::Error, "failed")
        };
        let obj = encode(&enc, &record, &[Field::new("code", 500)]);

        let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        assert_eq!(keys, ["L", "T", "N", "C", "M", "code"]);
        assert_eq!(obj["L"], "ERROR");
        assert_eq!(obj["N"], "api");
        assert_eq!(obj["C"], "src/main.rs:7");
        assert_eq!(obj["M"], "failed");
        assert!(obj["T"].is_i64());
    }

    #[test]
    fn custom_keys_and_function() {
        let enc = JsonEncoder::new(
            &FormatConfig {
                message_key: "msg".to_string(),
                level_key: "severity".to_string(),
                function_key: "fn".to_string(),
                ..FormatConfig::default()
            },
            false,
        )
        .unwrap();
        let record = Record {
            function: Some("jobs::run"),
            stacktrace: Some("frame 0"),
            ..Record::new(Level::Warn, "slow")
        };
        let obj = encode(&enc, &record, &[]);

        assert_eq!(obj["msg"], "slow");
        assert_eq!(obj["severity"], "WARN");
        assert_eq!(obj["fn"], "jobs::run");
        assert_eq!(obj["S"], "frame 0");
        assert!(!obj.contains_key("M"));
    }

    #[test]
    fn colliding_fields_are_prefixed() {
        let enc = JsonEncoder::new(&FormatConfig::default(), false).unwrap();
        let record = Record {
            fields: &[Field::new("L", "spoofed")],
            ..Record::new(Level::Info, "real")
        };
        let obj = encode(&enc, &record, &[Field::new("M", "shadow"), Field::new("user", 7)]);

        assert_eq!(obj["M"], "real");
        assert_eq!(obj["L"], "INFO");
        assert_eq!(obj["fields.M"], "shadow");
        assert_eq!(obj["fields.L"], "spoofed");
        assert_eq!(obj["user"], 7);
    }
}
