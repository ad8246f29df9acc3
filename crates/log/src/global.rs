//! Crate-level logging functions
//!
//! Plain functions log through the default logger; `_context` functions log
//! through the logger carried by a [`LogContext`], falling back to the
//! default logger.

use std::fmt;
use std::panic::Location;

use crate::context::LogContext;
use crate::field::Field;
use crate::level::Level;
use crate::logger::{Logger, Options};
use crate::registry;
use crate::sink::Caller;

macro_rules! level_functions {
    ($(
        $level:ident: $plain:ident, $format:ident, $line:ident,
        $plain_ctx:ident, $format_ctx:ident, $line_ctx:ident;
    )*) => {
        $(
            #[doc = concat!("Log a message at ", stringify!($level), " level through the default logger")]
            #[track_caller]
            pub fn $plain(msg: impl fmt::Display) {
                log(Level::$level, format_args!("{msg}"));
            }

            #[doc = concat!("Log pre-formatted arguments at ", stringify!($level), " level through the default logger")]
            #[track_caller]
            pub fn $format(args: fmt::Arguments<'_>) {
                log(Level::$level, args);
            }

            #[doc = concat!("Log a message and a newline at ", stringify!($level), " level through the default logger")]
            #[track_caller]
            pub fn $line(msg: impl fmt::Display) {
                log(Level::$level, format_args!("{msg}\n"));
            }

            #[doc = concat!("Log a message at ", stringify!($level), " level through the context's logger")]
            #[track_caller]
            pub fn $plain_ctx(ctx: &LogContext, msg: impl fmt::Display) {
                log_context(ctx, Level::$level, format_args!("{msg}"));
            }

            #[doc = concat!("Log pre-formatted arguments at ", stringify!($level), " level through the context's logger")]
            #[track_caller]
            pub fn $format_ctx(ctx: &LogContext, args: fmt::Arguments<'_>) {
                log_context(ctx, Level::$level, args);
            }

            #[doc = concat!("Log a message and a newline at ", stringify!($level), " level through the context's logger")]
            #[track_caller]
            pub fn $line_ctx(ctx: &LogContext, msg: impl fmt::Display) {
                log_context(ctx, Level::$level, format_args!("{msg}\n"));
            }
        )*
    };
}

level_functions! {
    Trace: trace, tracef, traceln, trace_context, tracef_context, traceln_context;
    Debug: debug, debugf, debugln, debug_context, debugf_context, debugln_context;
    Info: info, infof, infoln, info_context, infof_context, infoln_context;
    Warn: warn, warnf, warnln, warn_context, warnf_context, warnln_context;
    Error: error, errorf, errorln, error_context, errorf_context, errorln_context;
    Fatal: fatal, fatalf, fatalln, fatal_context, fatalf_context, fatalln_context;
    Panic: panic, panicf, panicln, panic_context, panicf_context, panicln_context;
}

/// Log through the default logger with an explicit function name
///
/// Used by the logging macros.
#[doc(hidden)]
#[track_caller]
pub fn log_at(level: Level, function: Option<&str>, args: fmt::Arguments<'_>) {
    if level == Level::Trace && !crate::trace::trace_enabled() {
        return;
    }
    let caller = Caller::from(Location::caller());
    registry::with_default(|logger| logger.log_record(level, Some(caller), function, args, &[]));
}

/// Log through a context's logger with an explicit function name
#[doc(hidden)]
#[track_caller]
pub fn log_context_at(
    ctx: &LogContext,
    level: Level,
    function: Option<&str>,
    args: fmt::Arguments<'_>,
) {
    if level == Level::Trace && !crate::trace::trace_enabled() {
        return;
    }
    let caller = Caller::from(Location::caller());
    ctx.dispatch(|logger| logger.log_record(level, Some(caller), function, args, &[]));
}

#[track_caller]
fn log(level: Level, args: fmt::Arguments<'_>) {
    log_at(level, None, args);
}

#[track_caller]
fn log_context(ctx: &LogContext, level: Level, args: fmt::Arguments<'_>) {
    log_context_at(ctx, level, None, args);
}

/// Default logger carrying key/value pairs
pub fn with<I, F>(pairs: I) -> Logger
where
    I: IntoIterator<Item = F>,
    F: Into<Field>,
{
    registry::with_default(|logger| {
        logger
            .with_options(Options::additional_caller_skip(-1))
            .with(pairs)
    })
}

/// Default logger carrying `fields`
pub fn with_fields(fields: &[Field]) -> Logger {
    registry::with_default(|logger| {
        logger
            .with_options(Options::additional_caller_skip(-1))
            .with_fields(fields)
    })
}

/// Context logger carrying key/value pairs
pub fn with_context<I, F>(ctx: &LogContext, pairs: I) -> Logger
where
    I: IntoIterator<Item = F>,
    F: Into<Field>,
{
    match ctx.logger() {
        Some(_) => ctx.dispatch(|logger| logger.with(pairs)),
        None => with(pairs),
    }
}

/// Context logger carrying `fields`
pub fn with_fields_context(ctx: &LogContext, fields: &[Field]) -> Logger {
    match ctx.logger() {
        Some(_) => ctx.dispatch(|logger| logger.with_fields(fields)),
        None => with_fields(fields),
    }
}

/// Set the threshold of the default logger's output at index `output`
pub fn set_level(output: &str, level: Level) {
    registry::with_default(|logger| logger.set_level(output, level));
}

/// Threshold of the default logger's output at index `output`
pub fn get_level(output: &str) -> Level {
    registry::with_default(|logger| logger.get_level(output))
}
