//! Configuration types
//!
//! This module provides configuration types for the logging system, organized into:
//! - `base`: the output list ([`Config`]) and a single output ([`OutputConfig`])
//! - `writer`: physical writer settings, write modes and file rolling
//! - `format`: encoder key names and time format
//! - `presets`: pre-configured setups (default, development, production)

mod base;
mod format;
mod presets;
mod writer;

// Re-export all public types
pub use base::{Config, OutputConfig};
pub use format::FormatConfig;
pub use writer::{RollType, TimeUnit, WriteMode, WriterConfig};
