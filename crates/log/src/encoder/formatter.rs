//! Built-in formatter plugins

use std::sync::Arc;

use super::{ConsoleEncoder, JsonEncoder};
use crate::config::OutputConfig;
use crate::core::LogResult;
use crate::decoder::OutputDecoder;
use crate::plugin::{Decoder, FORMATTER_PLUGIN_TYPE, Factory, downcast_decoder};

/// Name of the console formatter
pub const FORMATTER_CONSOLE: &str = "console";
/// Name of the JSON formatter
pub const FORMATTER_JSON: &str = "json";

/// Builds [`ConsoleEncoder`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleFormatter;

/// Builds [`JsonEncoder`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

fn decode_output(decoder: &mut dyn Decoder) -> LogResult<(&mut OutputDecoder, OutputConfig)> {
    let decoder = downcast_decoder::<OutputDecoder>(decoder)?;
    let mut output = OutputConfig::default();
    decoder.decode(&mut output)?;
    Ok((decoder, output))
}

impl Factory for ConsoleFormatter {
    fn type_name(&self) -> &str {
        FORMATTER_PLUGIN_TYPE
    }

    fn setup(&self, _name: &str, decoder: &mut dyn Decoder) -> LogResult<()> {
        let (decoder, output) = decode_output(decoder)?;
        let encoder = ConsoleEncoder::new(&output.format_config, output.enable_color)?;
        decoder.set_encoder(Arc::new(encoder));
        Ok(())
    }
}

impl Factory for JsonFormatter {
    fn type_name(&self) -> &str {
        FORMATTER_PLUGIN_TYPE
    }

    fn setup(&self, _name: &str, decoder: &mut dyn Decoder) -> LogResult<()> {
        let (decoder, output) = decode_output(decoder)?;
        let encoder = JsonEncoder::new(&output.format_config, output.enable_color)?;
        decoder.set_encoder(Arc::new(encoder));
        Ok(())
    }
}
