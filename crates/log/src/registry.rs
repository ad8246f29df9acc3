//! Process-wide named loggers
//!
//! Loggers are registered once under a name and looked up by it. The
//! reserved name [`DEFAULT_LOGGER_NAME`] may be registered any number of
//! times; the last registration becomes the logger behind the crate-level
//! functions. Until one is registered, a console logger at debug level is
//! used.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwapOption;
use parking_lot::RwLock;

use crate::config::Config;
use crate::core::{LogError, LogResult};
use crate::logger::{INTERNAL_TARGET, Logger};

/// Name of the default logger
pub const DEFAULT_LOGGER_NAME: &str = "default";

static LOGGERS: LazyLock<RwLock<HashMap<String, Logger>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Active default, published for lock-free reads
static DEFAULT: ArcSwapOption<Logger> = ArcSwapOption::const_empty();

/// Console logger used while no default is registered
static FALLBACK: LazyLock<Logger> = LazyLock::new(|| {
    Logger::from_config(&Config::default()).unwrap_or_else(|e| {
        tracing::warn!(target: INTERNAL_TARGET, error = %e, "console logger unavailable");
        Logger::noop()
    })
});

/// Register `logger` under `name`
///
/// # Panics
///
/// Panics if a logger other than the default is registered twice under the
/// same name. Use [`try_register`] to handle that case.
pub fn register(name: &str, logger: Logger) {
    if let Err(e) = try_register(name, logger) {
        panic!("{e}");
    }
}

/// Register `logger` under `name`, failing on a duplicate non-default name
pub fn try_register(name: &str, logger: Logger) -> LogResult<()> {
    if name == DEFAULT_LOGGER_NAME {
        set_default(logger);
        return Ok(());
    }

    let mut loggers = LOGGERS.write();
    if loggers.contains_key(name) {
        return Err(LogError::DuplicateLogger(name.to_string()));
    }
    loggers.insert(name.to_string(), logger);
    drop(loggers);

    tracing::debug!(target: INTERNAL_TARGET, name, "logger registered");
    Ok(())
}

/// Logger registered under `name`
pub fn get(name: &str) -> Option<Logger> {
    if name == DEFAULT_LOGGER_NAME {
        return DEFAULT.load_full().map(|logger| (*logger).clone());
    }
    LOGGERS.read().get(name).cloned()
}

/// Replace the active default logger
pub fn set_default(logger: Logger) {
    DEFAULT.store(Some(Arc::new(logger)));
    tracing::debug!(target: INTERNAL_TARGET, "default logger replaced");
}

/// The active default logger
pub fn default_logger() -> Logger {
    with_default(Logger::clone)
}

/// Run `f` against the active default logger without cloning it
pub(crate) fn with_default<R>(f: impl FnOnce(&Logger) -> R) -> R {
    let current = DEFAULT.load();
    match current.as_deref() {
        Some(logger) => f(logger),
        None => f(&FALLBACK),
    }
}

/// Flush every registered logger and the default
///
/// Failures are reported through `tracing` and otherwise ignored so that
/// every logger gets flushed.
pub fn sync() {
    let loggers: Vec<(String, Logger)> = LOGGERS
        .read()
        .iter()
        .map(|(name, logger)| (name.clone(), logger.clone()))
        .collect();

    for (name, logger) in &loggers {
        if let Err(e) = logger.sync() {
            tracing::warn!(target: INTERNAL_TARGET, name = %name, error = %e, "logger sync failed");
        }
    }
    if let Err(e) = with_default(Logger::sync) {
        tracing::warn!(target: INTERNAL_TARGET, name = DEFAULT_LOGGER_NAME, error = %e, "logger sync failed");
    }
}
