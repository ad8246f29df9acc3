//! Tab-separated console encoder

use std::io;

use serde_json::{Map, Value};

use super::{Encoder, EncoderConfig};
use crate::config::FormatConfig;
use crate::core::LogResult;
use crate::field::Field;
use crate::sink::Record;

/// Human readable encoder
///
/// `time<TAB>level<TAB>name<TAB>caller<TAB>function<TAB>message<TAB>{fields}`,
/// skipping absent elements, followed by the stacktrace on its own lines.
#[derive(Debug, Clone)]
pub struct ConsoleEncoder {
    config: EncoderConfig,
}

impl ConsoleEncoder {
    /// Create from a format configuration
    pub fn new(cfg: &FormatConfig, enable_color: bool) -> LogResult<Self> {
        Ok(Self {
            config: EncoderConfig::new(cfg, enable_color)?,
        })
    }
}

impl Encoder for ConsoleEncoder {
    fn encode(&self, record: &Record<'_>, context: &[Field], buf: &mut Vec<u8>) -> LogResult<()> {
        let mut elements: Vec<String> = Vec::with_capacity(7);

        elements.push(match self.config.time.encode(record.time) {
            Value::String(s) => s,
            other => other.to_string(),
        });
        elements.push(self.config.level.encode(record.level));
        if let Some(name) = record.logger_name.filter(|n| !n.is_empty()) {
            elements.push(name.to_string());
        }
        if let Some(caller) = record.caller {
            elements.push(caller.to_string());
        }
        if let (Some(_), Some(function)) = (&self.config.keys.function, record.function) {
            elements.push(function.to_string());
        }
        elements.push(record.message.to_string());

        buf.extend_from_slice(elements.join("\t").as_bytes());

        if !context.is_empty() || !record.fields.is_empty() {
            let fields: Map<String, Value> = context
                .iter()
                .chain(record.fields)
                .map(|f| (f.key.clone(), f.value.clone()))
                .collect();
            buf.push(b'\t');
            serde_json::to_writer(&mut *buf, &fields).map_err(io::Error::from)?;
        }

        if let Some(stack) = record.stacktrace.filter(|s| !s.is_empty()) {
            buf.push(b'\n');
            buf.extend_from_slice(stack.trim_end().as_bytes());
        }
        buf.push(b'\n');
        Ok(())
    }
}
