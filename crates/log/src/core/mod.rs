//! Core components shared by every part of the logging system.
//!
//! ### [`error`] - Error handling
//! [`LogError`] and the [`LogResult`] alias used by registries, factories,
//! sinks and the composer.

pub mod error;

// Re-export core types
pub use error::{LogError, LogResult};
