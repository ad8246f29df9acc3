//! Convenience macros for formatted logging
//!
//! Each macro records the calling module as the function field and accepts
//! an optional target:
//!
//! ```ignore
//! info!("listening on {}", addr);                 // default logger
//! warn!(logger: db_logger, "slow query: {q}");    // explicit logger
//! error!(ctx: &request_ctx, "failed: {err}");     // logger carried by a context
//! ```

#[doc(hidden)]
#[macro_export]
macro_rules! __log {
    ($level:expr, logger: $logger:expr, $($arg:tt)+) => {
        $logger.log_at($level, ::std::option::Option::Some(::std::module_path!()), ::std::format_args!($($arg)+))
    };
    ($level:expr, ctx: $ctx:expr, $($arg:tt)+) => {
        $crate::log_context_at($ctx, $level, ::std::option::Option::Some(::std::module_path!()), ::std::format_args!($($arg)+))
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::log_at($level, ::std::option::Option::Some(::std::module_path!()), ::std::format_args!($($arg)+))
    };
}

/// Log at trace level; only produced while the trace gate is open
#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => { $crate::__log!($crate::Level::Trace, $($arg)+) };
}

/// Log at debug level
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => { $crate::__log!($crate::Level::Debug, $($arg)+) };
}

/// Log at info level
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => { $crate::__log!($crate::Level::Info, $($arg)+) };
}

/// Log at warn level
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => { $crate::__log!($crate::Level::Warn, $($arg)+) };
}

/// Log at error level
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => { $crate::__log!($crate::Level::Error, $($arg)+) };
}

/// Log at fatal level, then exit the process
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => { $crate::__log!($crate::Level::Fatal, $($arg)+) };
}
