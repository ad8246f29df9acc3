//! Core configuration types

use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{FormatConfig, WriterConfig};
use crate::core::LogResult;
use crate::level::Level;

/// Logger configuration
///
/// An ordered list of outputs. The position of an output in this list is the
/// index used by [`Logger::set_level`](crate::Logger::set_level) and
/// [`Logger::get_level`](crate::Logger::get_level).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config(pub Vec<OutputConfig>);

/// One output of a logger
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Registered writer name (`console`, `file` or a business writer)
    pub writer: String,

    /// Physical writer settings
    pub writer_config: WriterConfig,

    /// Registered formatter name, empty means `console`
    pub formatter: String,

    /// Encoder settings
    pub format_config: FormatConfig,

    /// Business specific settings for writers registered by third parties
    pub remote_config: serde_json::Value,

    /// Minimum level, empty means `debug`
    pub level: String,

    /// Caller skip override, zero means unset
    pub caller_skip: i32,

    /// Render levels with ANSI colors
    pub enable_color: bool,
}

impl Config {
    /// Create a configuration from a list of outputs
    pub fn new(outputs: impl IntoIterator<Item = OutputConfig>) -> Self {
        Self(outputs.into_iter().collect())
    }

    /// Append an output
    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.0.push(output);
        self
    }
}

impl Deref for Config {
    type Target = Vec<OutputConfig>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Config {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl FromIterator<OutputConfig> for Config {
    fn from_iter<I: IntoIterator<Item = OutputConfig>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl OutputConfig {
    /// Create an output for the given writer with everything else defaulted
    pub fn new(writer: impl Into<String>) -> Self {
        Self {
            writer: writer.into(),
            ..Self::default()
        }
    }

    /// Resolved minimum level
    pub fn min_level(&self) -> Level {
        Level::from_config(&self.level)
    }

    /// Decode the opaque `remote_config` payload into a writer's settings type
    ///
    /// A missing payload decodes as `null`, so settings types with all-optional
    /// fields should derive `Default` and use `#[serde(default)]`.
    pub fn remote_config<T: DeserializeOwned>(&self) -> LogResult<T> {
        Ok(T::deserialize(&self.remote_config)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn config_is_a_plain_list() {
        let config: Config = serde_json::from_value(json!([
            {"writer": "console", "level": "info"},
            {"writer": "file", "writer_config": {"file_name": "app.log"}}
        ]))
        .unwrap();

        assert_eq!(config.len(), 2);
        assert_eq!(config[0].min_level(), Level::Info);
        assert_eq!(config[1].min_level(), Level::Debug);
        assert_eq!(config[1].writer_config.file_name, "app.log");
        assert_eq!(config[1].caller_skip, 0);
        assert!(!config[1].enable_color);
    }

    #[test]
    fn remote_config_decodes_into_plugin_settings() {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Remote {
            endpoint: String,
            batch: usize,
        }

        let output = OutputConfig {
            remote_config: json!({"endpoint": "udp://collector:514", "batch": 32}),
            ..OutputConfig::new("remote")
        };
        let remote: Remote = output.remote_config().unwrap();
        assert_eq!(
            remote,
            Remote {
                endpoint: "udp://collector:514".to_string(),
                batch: 32
            }
        );
    }

    #[test]
    fn remote_config_mismatch_is_an_error() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Remote {
            endpoint: String,
        }

        let output = OutputConfig::new("remote");
        assert!(output.remote_config::<Remote>().is_err());
    }
}
