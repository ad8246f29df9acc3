//! Writer implementations
//!
//! Writers are [`Factory`] plugins kept in their own name-keyed registry. A
//! writer factory downcasts the decoder to [`OutputDecoder`], builds the
//! physical writer for its output and stores the resulting [`Sink`].
//! [`build_sink`] does the encoder and level part for any
//! [`BoxMakeWriter`], so a business writer only has to supply the writer.

mod console;
#[cfg(feature = "file")]
mod file;
#[cfg(feature = "file")]
mod roll;

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::config::OutputConfig;
use crate::core::LogResult;
use crate::encoder::new_encoder;
use crate::level::AtomicLevel;
use crate::plugin::Factory;
use crate::sink::{IoCore, Sink};

pub use console::ConsoleWriterFactory;
#[cfg(feature = "file")]
pub use file::FileWriterFactory;
#[cfg(feature = "file")]
pub use roll::RollOptions;

/// Name of the stdout writer
pub const OUTPUT_CONSOLE: &str = "console";
/// Name of the rolling file writer
pub const OUTPUT_FILE: &str = "file";

/// Name-keyed writer table
#[derive(Default)]
pub struct WriterRegistry {
    writers: HashMap<String, Arc<dyn Factory>>,
}

impl WriterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with `console` and, with the `file` feature, `file`
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.insert(OUTPUT_CONSOLE, Arc::new(ConsoleWriterFactory));
        #[cfg(feature = "file")]
        registry.insert(OUTPUT_FILE, Arc::new(FileWriterFactory));
        registry
    }

    /// Register or replace a writer
    pub fn insert(&mut self, name: impl Into<String>, factory: Arc<dyn Factory>) {
        self.writers.insert(name.into(), factory);
    }

    /// Look up a writer
    pub fn get(&self, name: &str) -> Option<Arc<dyn Factory>> {
        self.writers.get(name).cloned()
    }

    /// Whether a writer is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.writers.contains_key(name)
    }

    /// Number of registered writers
    pub fn len(&self) -> usize {
        self.writers.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.writers.is_empty()
    }
}

impl std::fmt::Debug for WriterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.writers.keys().collect();
        names.sort();
        f.debug_struct("WriterRegistry")
            .field("writers", &names)
            .finish()
    }
}

static WRITERS: LazyLock<RwLock<WriterRegistry>> =
    LazyLock::new(|| RwLock::new(WriterRegistry::with_builtins()));

/// Register a writer factory, replacing any writer with the same name
pub fn register_writer(name: &str, factory: Arc<dyn Factory>) {
    tracing::debug!(name, "registering writer");
    WRITERS.write().insert(name, factory);
}

/// Look up a writer factory
pub fn get_writer(name: &str) -> Option<Arc<dyn Factory>> {
    WRITERS.read().get(name)
}

/// Build the core for `output` on top of a physical writer
///
/// Resolves the level and the encoder from the output's configuration.
pub fn io_core(output: &OutputConfig, writer: BoxMakeWriter) -> LogResult<IoCore> {
    let level = AtomicLevel::new(output.min_level());
    let encoder = new_encoder(output)?;
    Ok(IoCore::new(encoder, writer, level))
}

/// Build a complete sink for `output` on top of a physical writer
pub fn build_sink(output: &OutputConfig, writer: BoxMakeWriter) -> LogResult<Sink> {
    Ok(io_core(output, writer)?.into())
}
