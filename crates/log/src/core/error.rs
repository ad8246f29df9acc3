//! Error handling for fanlog
//!
//! Every fallible operation returns [`LogResult<T>`]. Composition-time errors
//! are terminal for the logger being built: callers are expected to abort
//! initialization rather than continue with a degraded logger.

/// Type alias for Result with [`LogError`] for logging operations
pub type LogResult<T> = Result<T, LogError>;

/// Errors produced while composing or driving a logger
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LogError {
    /// Generic configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// The output list handed to the composer was empty
    #[error("log config output empty")]
    EmptyConfig,

    /// No writer factory is registered under the name
    #[error("writer '{0}' is not registered")]
    WriterNotFound(String),

    /// No formatter factory is registered under the name
    #[error("formatter '{0}' is not registered")]
    FormatterNotFound(String),

    /// A factory failed while building its sink
    #[error("writer '{writer}' setup failed: {source}")]
    Setup {
        /// Writer name of the failing output
        writer: String,
        /// Underlying failure
        #[source]
        source: Box<LogError>,
    },

    /// A factory returned successfully without producing a sink
    #[error("writer '{0}' did not produce a sink")]
    SinkMissing(String),

    /// The decoder handed to a factory is not the type it builds from
    #[error("invalid writer decoder type")]
    InvalidDecoderType,

    /// The slot passed to `Decoder::decode` has the wrong type
    #[error("decoder config type invalid, expected {expected}")]
    InvalidDecoderConfig {
        /// Type the decoder can populate
        expected: &'static str,
    },

    /// Unknown level name
    #[error("invalid log level '{0}'")]
    InvalidLevel(String),

    /// Unknown write mode
    #[error("invalid write mode '{0}', expected one of fast, async, sync")]
    InvalidWriteMode(String),

    /// Time layout could not be parsed
    #[error("invalid time pattern '{pattern}': {reason}")]
    InvalidTimePattern {
        /// Offending layout
        pattern: String,
        /// Parser message
        reason: String,
    },

    /// File sink has no usable file name
    #[error("invalid file path '{0}'")]
    InvalidFilePath(String),

    /// File sink could not open its file
    #[error("open file '{path}' failed: {reason}")]
    OpenFile {
        /// Path that failed to open
        path: String,
        /// Failure reason
        reason: String,
    },

    /// A non-default logger name was registered twice
    #[error("logger '{0}' registered twice")]
    DuplicateLogger(String),

    /// Remote config payload does not match the plugin's settings type
    #[error("invalid remote config: {0}")]
    RemoteConfig(#[from] serde_json::Error),

    /// IO error while writing or flushing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// One or more sinks failed during a fan-out write or sync
    #[error("{} sink(s) failed, first: {}", .0.len(), .0.first().map(ToString::to_string).unwrap_or_default())]
    Sinks(Vec<LogError>),
}

impl LogError {
    /// Wrap a factory failure with the writer it came from
    pub fn setup(writer: impl Into<String>, source: LogError) -> Self {
        Self::Setup {
            writer: writer.into(),
            source: Box::new(source),
        }
    }

    /// Whether this error was raised while composing a logger
    pub fn is_config_error(&self) -> bool {
        !matches!(self, Self::Io(_) | Self::Sinks(_))
    }
}
