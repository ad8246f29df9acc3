//! Logger factory plugin

use crate::config::Config;
use crate::core::{LogError, LogResult};
use crate::decoder::ConfigDecoder;
use crate::plugin::{Decoder, Factory, LOG_PLUGIN_TYPE, downcast_decoder};
use crate::registry;

use super::Logger;

/// Composes a logger from a whole [`Config`] and registers it under the
/// name it was set up with
///
/// Registered as the `"log"` plugin named `"default"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggerFactory;

impl Factory for LoggerFactory {
    fn type_name(&self) -> &str {
        LOG_PLUGIN_TYPE
    }

    fn setup(&self, name: &str, decoder: &mut dyn Decoder) -> LogResult<()> {
        let decoder = downcast_decoder::<ConfigDecoder>(decoder)?;
        let mut config = Config::new([]);
        decoder.decode(&mut config)?;
        if config.is_empty() {
            return Err(LogError::EmptyConfig);
        }

        let logger = Logger::from_config(&config)?;
        registry::try_register(name, logger)
    }
}
