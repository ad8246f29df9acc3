//! Concrete decoders handed to factories

use std::any::Any;
use std::sync::Arc;

use crate::config::{Config, OutputConfig};
use crate::core::{LogError, LogResult};
use crate::encoder::Encoder;
use crate::plugin::Decoder;
use crate::sink::Sink;

/// Decoder for a single output
///
/// Writer factories decode the [`OutputConfig`] and store the built
/// [`Sink`]; formatter factories store an [`Encoder`] instead.
pub struct OutputDecoder {
    output: OutputConfig,
    sink: Option<Sink>,
    encoder: Option<Arc<dyn Encoder>>,
}

impl OutputDecoder {
    /// Decoder carrying `output`
    pub fn new(output: OutputConfig) -> Self {
        Self {
            output,
            sink: None,
            encoder: None,
        }
    }

    /// Output this decoder carries
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Hand back the built sink
    pub fn set_sink(&mut self, sink: Sink) {
        self.sink = Some(sink);
    }

    /// Hand back the built encoder
    pub fn set_encoder(&mut self, encoder: Arc<dyn Encoder>) {
        self.encoder = Some(encoder);
    }

    /// Take the encoder stored by a formatter factory
    pub fn take_encoder(&mut self) -> Option<Arc<dyn Encoder>> {
        self.encoder.take()
    }

    /// Consume the decoder, returning the sink stored by a writer factory
    pub fn into_sink(self) -> Option<Sink> {
        self.sink
    }
}

impl Decoder for OutputDecoder {
    fn decode(&self, cfg: &mut dyn Any) -> LogResult<()> {
        let slot = cfg
            .downcast_mut::<OutputConfig>()
            .ok_or(LogError::InvalidDecoderConfig {
                expected: "OutputConfig",
            })?;
        slot.clone_from(&self.output);
        Ok(())
    }
}

/// Decoder for a whole logger configuration
pub struct ConfigDecoder {
    config: Config,
}

impl ConfigDecoder {
    /// Decoder carrying `config`
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl Decoder for ConfigDecoder {
    fn decode(&self, cfg: &mut dyn Any) -> LogResult<()> {
        let slot = cfg
            .downcast_mut::<Config>()
            .ok_or(LogError::InvalidDecoderConfig { expected: "Config" })?;
        slot.clone_from(&self.config);
        Ok(())
    }
}
