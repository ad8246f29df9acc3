//! Stdout writer

use std::io;

use tracing_subscriber::fmt::writer::BoxMakeWriter;

use super::build_sink;
use crate::config::OutputConfig;
use crate::core::LogResult;
use crate::decoder::OutputDecoder;
use crate::plugin::{Decoder, Factory, LOG_PLUGIN_TYPE, downcast_decoder};

/// Writes every record to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleWriterFactory;

impl Factory for ConsoleWriterFactory {
    fn type_name(&self) -> &str {
        LOG_PLUGIN_TYPE
    }

    fn setup(&self, _name: &str, decoder: &mut dyn Decoder) -> LogResult<()> {
        let decoder = downcast_decoder::<OutputDecoder>(decoder)?;
        let mut output = OutputConfig::default();
        decoder.decode(&mut output)?;

        let sink = build_sink(&output, BoxMakeWriter::new(io::stdout))?;
        decoder.set_sink(sink);
        Ok(())
    }
}
