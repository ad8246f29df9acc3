//! Rolling file writer

use tracing_appender::non_blocking::NonBlockingBuilder;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use super::io_core;
use super::roll::RollOptions;
use crate::config::{OutputConfig, WriteMode};
use crate::core::LogResult;
use crate::decoder::OutputDecoder;
use crate::plugin::{Decoder, Factory, LOG_PLUGIN_TYPE, downcast_decoder};
use crate::sink::Sink;

/// Writes records to a rolling file
///
/// `sync` writes on the calling thread. `async` and `fast` hand records to a
/// background worker; `fast` drops records when the worker falls behind.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileWriterFactory;

impl FileWriterFactory {
    fn build(output: &OutputConfig) -> LogResult<Sink> {
        let mode = output.writer_config.write_mode()?;
        let options = RollOptions::from_config(&output.writer_config)?;
        let appender = options.open()?;

        tracing::debug!(
            dir = %options.dir.display(),
            file = %options.file_name,
            mode = %mode,
            "opening file writer"
        );

        let core = match mode {
            WriteMode::Sync => io_core(output, BoxMakeWriter::new(appender))?,
            WriteMode::Async | WriteMode::Fast => {
                let (writer, guard) = NonBlockingBuilder::default()
                    .lossy(mode == WriteMode::Fast)
                    .finish(appender);
                io_core(output, BoxMakeWriter::new(writer))?.with_guard(guard)
            }
        };
        Ok(core.into())
    }
}

impl Factory for FileWriterFactory {
    fn type_name(&self) -> &str {
        LOG_PLUGIN_TYPE
    }

    fn setup(&self, _name: &str, decoder: &mut dyn Decoder) -> LogResult<()> {
        let decoder = downcast_decoder::<OutputDecoder>(decoder)?;
        let mut output = OutputConfig::default();
        decoder.decode(&mut output)?;

        decoder.set_sink(Self::build(&output)?);
        Ok(())
    }
}
