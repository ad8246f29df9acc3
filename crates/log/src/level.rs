//! Severity levels and the per-sink mutable threshold

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

use crate::core::LogError;
use crate::logger::INTERNAL_TARGET;

/// Log level
///
/// Totally ordered: `Off < Trace < Debug < Info < Warn < Error < Fatal < Panic`.
/// `Off` as a sink threshold disables the sink entirely.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Level {
    /// Disables output
    Off = 0,
    /// Trace level, additionally gated by the trace environment flag
    Trace,
    /// Debug level
    #[default]
    Debug,
    /// Info level
    Info,
    /// Warn level
    Warn,
    /// Error level
    Error,
    /// Fatal level, terminates the process after logging
    Fatal,
    /// Panic level, panics after logging
    Panic,
}

impl Level {
    /// All levels that carry a name, in ascending severity
    pub const ALL: [Level; 7] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
        Level::Panic,
    ];

    /// Lowercase name, empty for [`Level::Off`]
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Off => "",
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
            Level::Panic => "panic",
        }
    }

    /// Uppercase label used by encoders
    pub const fn capital(self) -> &'static str {
        match self {
            Level::Off => "",
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
            Level::Panic => "PANIC",
        }
    }

    /// Convert the raw representation back into a level
    ///
    /// Values outside the table map to [`Level::Off`].
    pub const fn from_u8(value: u8) -> Self {
        match value {
            1 => Level::Trace,
            2 => Level::Debug,
            3 => Level::Info,
            4 => Level::Warn,
            5 => Level::Error,
            6 => Level::Fatal,
            7 => Level::Panic,
            _ => Level::Off,
        }
    }

    /// Resolve a configured threshold
    ///
    /// The empty string means [`Level::Debug`]. Unknown names fall back to
    /// [`Level::Info`] with a warning instead of failing composition.
    pub fn from_config(value: &str) -> Self {
        if value.is_empty() {
            return Level::Debug;
        }
        value.parse().unwrap_or_else(|_| {
            tracing::warn!(
                target: INTERNAL_TARGET,
                level = value,
                "unknown log level, using info"
            );
            Level::Info
        })
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| LogError::InvalidLevel(s.to_string()))
    }
}

/// Level threshold shared between a sink and the level controller
///
/// Cloning shares the underlying value: a change through any clone is seen
/// by the sink on its next write.
#[derive(Clone)]
pub struct AtomicLevel(Arc<AtomicU8>);

impl AtomicLevel {
    /// Create a handle starting at `level`
    pub fn new(level: Level) -> Self {
        Self(Arc::new(AtomicU8::new(level as u8)))
    }

    /// Current threshold
    #[inline]
    pub fn level(&self) -> Level {
        Level::from_u8(self.0.load(Ordering::Relaxed))
    }

    /// Replace the threshold
    #[inline]
    pub fn set_level(&self, level: Level) {
        self.0.store(level as u8, Ordering::Relaxed);
    }

    /// Whether a record at `level` passes this threshold
    #[inline]
    pub fn enabled(&self, level: Level) -> bool {
        let threshold = self.level();
        threshold != Level::Off && level != Level::Off && level >= threshold
    }
}

impl Default for AtomicLevel {
    fn default() -> Self {
        Self::new(Level::Debug)
    }
}

impl fmt::Debug for AtomicLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicLevel").field(&self.level()).finish()
    }
}
