//! # fanlog - Configuration-driven multi-output logging
//!
//! One log call, many outputs. A [`Config`] is an ordered list of outputs;
//! each names a writer (`console`, `file` or one registered by business
//! code), a formatter (`console` or `json`), its own level and its own field
//! names. [`Logger::from_config`] builds one sink per output and tees them
//! into a single [`Logger`] whose per-output levels can be changed at
//! runtime by index.
//!
//! ## Quick Start
//!
//! ```no_run
//! fn main() -> fanlog::LogResult<()> {
//!     fanlog::init()?;
//!
//!     fanlog::info("server starting");
//!     fanlog::info!("listening on port {}", 8080);
//!     fanlog::set_level("0", fanlog::Level::Warn);
//!
//!     fanlog::sync();
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! ```yaml
//! - writer: console
//!   level: debug
//! - writer: file
//!   formatter: json
//!   level: info
//!   writer_config:
//!     log_path: /var/log/app
//!     file_name: app.log
//!     write_mode: async
//!     roll_type: time
//!     time_unit: hour
//!     max_backups: 24
//!   format_config:
//!     time_format: milliseconds
//!     message_key: msg
//! ```
//!
//! Trace records are only produced when `FANLOG_TRACE` is set to a value
//! other than empty or `0`.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod config;
pub mod context;
pub mod core;
pub mod decoder;
pub mod encoder;
pub mod field;
mod global;
pub mod layer;
pub mod level;
pub mod logger;
mod macros;
pub mod plugin;
pub mod registry;
pub mod sink;
pub mod trace;
pub mod writer;

// Public API
pub use config::{Config, FormatConfig, OutputConfig, WriterConfig};
pub use context::LogContext;
pub use crate::core::{LogError, LogResult};
pub use field::Field;
pub use global::*;
pub use layer::LoggerLayer;
pub use level::{AtomicLevel, Level};
pub use logger::{Logger, Options};
pub use registry::{default_logger, get, register, set_default, sync, try_register};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Config, Field, Level, LogContext, LogError, LogResult, Logger, Options, OutputConfig,
        debug, error, fatal, info, trace, warn,
    };
}

/// Initialize the default logger with one console output at debug level
pub fn init() -> LogResult<Logger> {
    init_with(&Config::default())
}

/// Compose a logger from `config` and make it the default logger
pub fn init_with(config: &Config) -> LogResult<Logger> {
    let logger = Logger::from_config(config)?;
    registry::register(registry::DEFAULT_LOGGER_NAME, logger.clone());
    Ok(logger)
}
