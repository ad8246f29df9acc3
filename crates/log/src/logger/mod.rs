//! The composite logger
//!
//! A [`Logger`] fans every call out to one sink per configured output. Each
//! sink keeps its own threshold, addressable at runtime by the output's
//! position in the [`Config`].

mod factory;

use std::backtrace::{Backtrace, BacktraceStatus};
use std::borrow::Cow;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use crate::config::Config;
use crate::core::{LogError, LogResult};
use crate::decoder::OutputDecoder;
use crate::field::Field;
use crate::level::{AtomicLevel, Level};
use crate::sink::{Caller, Core, Record, Sink, TeeCore};
use crate::{trace, writer};

pub use factory::LoggerFactory;

/// Caller skip used when no output configures one
pub const DEFAULT_CALLER_SKIP: i32 = 2;

/// Target of the crate's own diagnostics
pub(crate) const INTERNAL_TARGET: &str = "fanlog::internal";

/// Logger options
///
/// Call sites are located with `#[track_caller]`, so `caller_skip` does not
/// move the recorded caller. It is carried as metadata, readable through
/// [`Logger::caller_skip`], for writers that need the configured value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Number of wrapper frames between the user's call and the logger
    pub caller_skip: i32,
}

impl Options {
    /// Options adding `skip` to a logger's caller skip
    pub fn additional_caller_skip(skip: i32) -> Self {
        Self { caller_skip: skip }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            caller_skip: DEFAULT_CALLER_SKIP,
        }
    }
}

/// Last non-zero `caller_skip` in output order, [`DEFAULT_CALLER_SKIP`] if none
pub fn resolve_caller_skip(config: &Config) -> i32 {
    config
        .iter()
        .rev()
        .map(|output| output.caller_skip)
        .find(|&skip| skip != 0)
        .unwrap_or(DEFAULT_CALLER_SKIP)
}

/// Multi-output logger
///
/// Cheap to clone; clones share sinks and level handles.
#[derive(Clone)]
pub struct Logger {
    core: Arc<dyn Core>,
    levels: Arc<[AtomicLevel]>,
    options: Options,
    name: Option<Arc<str>>,
}

macro_rules! level_methods {
    ($($level:ident: $plain:ident, $format:ident, $line:ident;)*) => {
        $(
            #[doc = concat!("Log a message at ", stringify!($level), " level")]
            #[track_caller]
            pub fn $plain(&self, msg: impl fmt::Display) {
                self.log(Level::$level, format_args!("{msg}"));
            }

            #[doc = concat!("Log pre-formatted arguments at ", stringify!($level), " level")]
            #[track_caller]
            pub fn $format(&self, args: fmt::Arguments<'_>) {
                self.log(Level::$level, args);
            }

            #[doc = concat!("Log a message followed by a newline at ", stringify!($level), " level")]
            #[track_caller]
            pub fn $line(&self, msg: impl fmt::Display) {
                self.log(Level::$level, format_args!("{msg}\n"));
            }
        )*
    };
}

impl Logger {
    /// Compose a logger from an output list
    ///
    /// Every output's writer must be registered. Any failure aborts the whole
    /// composition; a partially built logger is never returned.
    pub fn from_config(config: &Config) -> LogResult<Self> {
        if config.is_empty() {
            return Err(LogError::EmptyConfig);
        }

        let mut sinks = Vec::with_capacity(config.len());
        for output in config.iter() {
            let factory = writer::get_writer(&output.writer)
                .ok_or_else(|| LogError::WriterNotFound(output.writer.clone()))?;

            let mut decoder = OutputDecoder::new(output.clone());
            factory
                .setup(&output.writer, &mut decoder)
                .map_err(|e| LogError::setup(&output.writer, e))?;
            let sink = decoder
                .into_sink()
                .ok_or_else(|| LogError::SinkMissing(output.writer.clone()))?;
            sinks.push(sink);
        }

        let options = Options {
            caller_skip: resolve_caller_skip(config),
        };
        tracing::debug!(
            target: INTERNAL_TARGET,
            outputs = sinks.len(),
            caller_skip = options.caller_skip,
            "logger composed"
        );
        Ok(Self::from_sinks(sinks, options))
    }

    /// Tee already built sinks, keeping their order for level addressing
    pub fn from_sinks(sinks: impl IntoIterator<Item = Sink>, options: Options) -> Self {
        let (cores, levels): (Vec<_>, Vec<_>) =
            sinks.into_iter().map(|s| (s.core, s.level)).unzip();
        Self {
            core: Arc::new(TeeCore::new(cores)),
            levels: levels.into(),
            options,
            name: None,
        }
    }

    /// Logger without sinks; every call is a no-op
    pub fn noop() -> Self {
        Self::from_sinks(Vec::new(), Options::default())
    }

    /// Number of sinks
    pub fn sink_count(&self) -> usize {
        self.levels.len()
    }

    /// Set the threshold of the sink at index `output`
    ///
    /// A non-numeric or out-of-range index is ignored.
    pub fn set_level(&self, output: &str, level: Level) {
        if let Some(handle) = self.level_handle(output) {
            handle.set_level(level);
        }
    }

    /// Threshold of the sink at index `output`, [`Level::Debug`] if there is none
    pub fn get_level(&self, output: &str) -> Level {
        self.level_handle(output)
            .map_or(Level::Debug, AtomicLevel::level)
    }

    fn level_handle(&self, output: &str) -> Option<&AtomicLevel> {
        output
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|index| self.levels.get(index))
    }

    /// Whether any sink accepts `level`
    pub fn enabled(&self, level: Level) -> bool {
        self.core.enabled(level)
    }

    /// Current options
    pub fn options(&self) -> Options {
        self.options
    }

    /// Current caller skip
    pub fn caller_skip(&self) -> i32 {
        self.options.caller_skip
    }

    /// Copy of this logger with `options.caller_skip` added to its skip
    pub fn with_options(&self, options: Options) -> Self {
        let mut logger = self.clone();
        logger.options.caller_skip += options.caller_skip;
        logger
    }

    /// Copy of this logger named `name`, nested under the current name if any
    pub fn named(&self, name: &str) -> Self {
        let mut logger = self.clone();
        logger.name = Some(match &self.name {
            Some(parent) if !name.is_empty() => format!("{parent}.{name}").into(),
            Some(parent) => Arc::clone(parent),
            None => name.into(),
        });
        logger
    }

    /// Logger name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Copy of this logger writing key/value pairs with every record
    pub fn with<I, F>(&self, pairs: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Field>,
    {
        let fields: Vec<Field> = pairs.into_iter().map(Into::into).collect();
        self.with_fields(&fields)
    }

    /// Copy of this logger writing `fields` with every record
    pub fn with_fields(&self, fields: &[Field]) -> Self {
        let mut logger = self.clone();
        logger.core = self.core.with(fields);
        logger
    }

    /// Flush every sink
    pub fn sync(&self) -> LogResult<()> {
        self.core.sync()
    }

    level_methods! {
        Trace: trace, tracef, traceln;
        Debug: debug, debugf, debugln;
        Info: info, infof, infoln;
        Warn: warn, warnf, warnln;
        Error: error, errorf, errorln;
        Fatal: fatal, fatalf, fatalln;
        Panic: panic, panicf, panicln;
    }

    /// Log `args` at `level`, recording the caller's location
    #[track_caller]
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        self.log_record(
            level,
            Some(Caller::from(Location::caller())),
            None,
            args,
            &[],
        );
    }

    /// Log `args` at `level` with an explicit function name
    ///
    /// Used by the logging macros.
    #[doc(hidden)]
    #[track_caller]
    pub fn log_at(&self, level: Level, function: Option<&str>, args: fmt::Arguments<'_>) {
        self.log_record(
            level,
            Some(Caller::from(Location::caller())),
            function,
            args,
            &[],
        );
    }

    /// Build a record and send it through every sink
    ///
    /// Trace records are dropped unless the trace gate is open. Once a sink
    /// accepts a fatal record the process exits, and a panic record panics.
    /// Records no sink accepts have no effect.
    pub fn log_record(
        &self,
        level: Level,
        caller: Option<Caller<'_>>,
        function: Option<&str>,
        args: fmt::Arguments<'_>,
        fields: &[Field],
    ) {
        if level == Level::Trace && !trace::trace_enabled() {
            return;
        }
        if !self.core.enabled(level) {
            return;
        }

        let message = match args.as_str() {
            Some(s) => Cow::Borrowed(s),
            None => Cow::Owned(args.to_string()),
        };

        let stacktrace = (level >= Level::Error)
            .then(Backtrace::capture)
            .filter(|bt| bt.status() == BacktraceStatus::Captured)
            .map(|bt| bt.to_string());

        let record = Record {
            logger_name: self.name.as_deref(),
            caller,
            function,
            fields,
            stacktrace: stacktrace.as_deref(),
            ..Record::new(level, &message)
        };
        if let Err(e) = self.core.write(&record) {
            tracing::warn!(target: INTERNAL_TARGET, error = %e, "log write failed");
        }

        match level {
            Level::Fatal => {
                let _ = self.core.sync();
                std::process::exit(1);
            }
            Level::Panic => panic!("{message}"),
            _ => {}
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("levels", &self.levels)
            .field("options", &self.options)
            .finish()
    }
}
