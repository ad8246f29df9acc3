//! Record encoders
//!
//! An [`Encoder`] turns a [`Record`] into bytes. The built-in encoders are
//! produced by formatter plugins (`console`, `json`) registered under the
//! `"formatter"` capability type, so business code can add its own.

mod console;
mod formatter;
mod json;
mod time_encoder;

use std::sync::Arc;

use crate::config::{FormatConfig, OutputConfig};
use crate::core::{LogError, LogResult};
use crate::decoder::OutputDecoder;
use crate::field::Field;
use crate::level::Level;
use crate::plugin::{self, FORMATTER_PLUGIN_TYPE};
use crate::sink::Record;

pub use console::ConsoleEncoder;
pub use formatter::{ConsoleFormatter, FORMATTER_CONSOLE, FORMATTER_JSON, JsonFormatter};
pub use json::JsonEncoder;
pub use time_encoder::TimeEncoder;

/// Serializes records for one output
pub trait Encoder: Send + Sync {
    /// Append the encoded `record` to `buf`, `context` fields before the
    /// record's own fields
    fn encode(&self, record: &Record<'_>, context: &[Field], buf: &mut Vec<u8>) -> LogResult<()>;
}

/// Field names used by an encoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderKeys {
    /// Time key
    pub time: String,
    /// Level key
    pub level: String,
    /// Logger name key
    pub name: String,
    /// Caller key
    pub caller: String,
    /// Function key, `None` omits the field
    pub function: Option<String>,
    /// Message key
    pub message: String,
    /// Stacktrace key
    pub stacktrace: String,
}

impl EncoderKeys {
    /// Resolve configured keys, falling back to the single-letter defaults
    pub fn from_config(cfg: &FormatConfig) -> Self {
        Self {
            time: key_or(&cfg.time_key, "T"),
            level: key_or(&cfg.level_key, "L"),
            name: key_or(&cfg.name_key, "N"),
            caller: key_or(&cfg.caller_key, "C"),
            function: (!cfg.function_key.is_empty()).then(|| cfg.function_key.clone()),
            message: key_or(&cfg.message_key, "M"),
            stacktrace: key_or(&cfg.stacktrace_key, "S"),
        }
    }

    /// Whether `key` names one of the record's own entries
    pub fn is_reserved(&self, key: &str) -> bool {
        [
            &self.time,
            &self.level,
            &self.name,
            &self.caller,
            &self.message,
            &self.stacktrace,
        ]
        .into_iter()
        .any(|k| k == key)
            || self.function.as_deref() == Some(key)
    }
}

impl Default for EncoderKeys {
    fn default() -> Self {
        Self::from_config(&FormatConfig::default())
    }
}

fn key_or(key: &str, default: &str) -> String {
    if key.is_empty() {
        default.to_string()
    } else {
        key.to_string()
    }
}

/// How levels are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LevelEncoder {
    /// `INFO`
    #[default]
    Capital,
    /// `INFO` wrapped in an ANSI color
    CapitalColor,
}

impl LevelEncoder {
    /// Plain or colored capitals
    pub fn new(color: bool) -> Self {
        if color {
            LevelEncoder::CapitalColor
        } else {
            LevelEncoder::Capital
        }
    }

    /// Render `level`
    pub fn encode(self, level: Level) -> String {
        match self {
            LevelEncoder::Capital => level.capital().to_string(),
            LevelEncoder::CapitalColor => {
                let color = match level {
                    Level::Off => return String::new(),
                    Level::Trace => "36",
                    Level::Debug => "35",
                    Level::Info => "34",
                    Level::Warn => "33",
                    Level::Error | Level::Fatal | Level::Panic => "31",
                };
                format!("\x1b[{color}m{}\x1b[0m", level.capital())
            }
        }
    }
}

/// Settings shared by the built-in encoders
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    /// Field names
    pub keys: EncoderKeys,
    /// Time rendering
    pub time: TimeEncoder,
    /// Level rendering
    pub level: LevelEncoder,
}

impl EncoderConfig {
    /// Build from a format configuration
    pub fn new(cfg: &FormatConfig, enable_color: bool) -> LogResult<Self> {
        Ok(Self {
            keys: EncoderKeys::from_config(cfg),
            time: TimeEncoder::new(&cfg.time_format)?,
            level: LevelEncoder::new(enable_color),
        })
    }
}

/// Build the encoder for an output through its formatter plugin
///
/// An empty formatter name selects `console`.
pub fn new_encoder(output: &OutputConfig) -> LogResult<Arc<dyn Encoder>> {
    let name = if output.formatter.is_empty() {
        FORMATTER_CONSOLE
    } else {
        output.formatter.as_str()
    };
    let factory = plugin::get(FORMATTER_PLUGIN_TYPE, name)
        .ok_or_else(|| LogError::FormatterNotFound(name.to_string()))?;

    let mut decoder = OutputDecoder::new(output.clone());
    factory.setup(name, &mut decoder)?;
    decoder
        .take_encoder()
        .ok_or_else(|| LogError::Config(format!("formatter '{name}' did not produce an encoder")))
}
