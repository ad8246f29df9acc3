//! Configuration presets for common scenarios

use std::path::Path;

use super::{Config, FormatConfig, OutputConfig, WriterConfig};
use crate::writer::{OUTPUT_CONSOLE, OUTPUT_FILE};

impl Default for Config {
    /// One console output at debug level
    fn default() -> Self {
        Self(vec![OutputConfig {
            writer: OUTPUT_CONSOLE.to_string(),
            formatter: "console".to_string(),
            level: "debug".to_string(),
            ..OutputConfig::default()
        }])
    }
}

impl Config {
    /// Development configuration (colored console, trace level)
    #[must_use]
    pub fn development() -> Self {
        Self(vec![OutputConfig {
            writer: OUTPUT_CONSOLE.to_string(),
            formatter: "console".to_string(),
            level: "trace".to_string(),
            enable_color: true,
            format_config: FormatConfig {
                function_key: "F".to_string(),
                ..FormatConfig::default()
            },
            ..OutputConfig::default()
        }])
    }

    /// Production configuration
    ///
    /// Info level on the console plus a daily rolled JSON file under `dir`.
    #[must_use]
    pub fn production(dir: impl AsRef<Path>) -> Self {
        Self(vec![
            OutputConfig {
                writer: OUTPUT_CONSOLE.to_string(),
                formatter: "console".to_string(),
                level: "info".to_string(),
                ..OutputConfig::default()
            },
            OutputConfig {
                writer: OUTPUT_FILE.to_string(),
                writer_config: WriterConfig {
                    log_path: dir.as_ref().to_path_buf(),
                    file_name: "app.log".to_string(),
                    write_mode: "async".to_string(),
                    roll_type: "time".to_string(),
                    max_backups: 7,
                    ..WriterConfig::default()
                },
                formatter: "json".to_string(),
                format_config: FormatConfig {
                    time_format: "milliseconds".to_string(),
                    time_key: "time".to_string(),
                    level_key: "level".to_string(),
                    name_key: "logger".to_string(),
                    caller_key: "caller".to_string(),
                    message_key: "msg".to_string(),
                    stacktrace_key: "stacktrace".to_string(),
                    ..FormatConfig::default()
                },
                level: "info".to_string(),
                ..OutputConfig::default()
            },
        ])
    }
}
