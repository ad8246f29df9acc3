//! Request scoped logger selection

use crate::logger::{Logger, Options};
use crate::registry;

/// Carries an optional logger through a unit of work
///
/// The `_context` functions log through the carried logger when there is
/// one and through the default logger otherwise.
#[derive(Debug, Clone, Default)]
pub struct LogContext {
    logger: Option<Logger>,
}

impl LogContext {
    /// Context without a logger
    pub fn new() -> Self {
        Self::default()
    }

    /// Context carrying `logger`
    pub fn with_logger(logger: Logger) -> Self {
        Self {
            logger: Some(logger),
        }
    }

    /// Replace the carried logger
    pub fn set_logger(&mut self, logger: Logger) {
        self.logger = Some(logger);
    }

    /// Carried logger
    pub fn logger(&self) -> Option<&Logger> {
        self.logger.as_ref()
    }

    /// Run `f` against the logger this context resolves to
    ///
    /// A carried logger has one frame less between the caller and the log
    /// call than the default logger, so its caller skip is reduced by one.
    pub(crate) fn dispatch<R>(&self, f: impl FnOnce(&Logger) -> R) -> R {
        match &self.logger {
            Some(logger) => f(&logger.with_options(Options::additional_caller_skip(-1))),
            None => registry::with_default(f),
        }
    }
}

impl From<Logger> for LogContext {
    fn from(logger: Logger) -> Self {
        Self::with_logger(logger)
    }
}
