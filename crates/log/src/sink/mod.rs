//! Sink cores
//!
//! A [`Core`] is the unit a logger fans out to. [`IoCore`] encodes records
//! and writes them to a physical writer; [`TeeCore`] duplicates every call to
//! a list of cores. A [`Sink`] is a built core plus the level handle the
//! logger uses to control it at runtime.

use std::fmt;
use std::io::Write;
use std::panic::Location;
use std::sync::Arc;

use time::OffsetDateTime;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::core::{LogError, LogResult};
use crate::encoder::Encoder;
use crate::field::Field;
use crate::level::{AtomicLevel, Level};

/// Source location of a log call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller<'a> {
    /// Source file
    pub file: &'a str,
    /// Line number
    pub line: u32,
}

impl<'a> From<&'a Location<'a>> for Caller<'a> {
    fn from(location: &'a Location<'a>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
        }
    }
}

impl fmt::Display for Caller<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", short_path(self.file), self.line)
    }
}

/// Keep the last directory and the file name
fn short_path(file: &str) -> &str {
    let mut seps = file.rmatch_indices(['/', '\\']).map(|(i, _)| i);
    match (seps.next(), seps.next()) {
        (Some(_), Some(dir)) => &file[dir + 1..],
        _ => file,
    }
}

/// A single log entry on its way to the encoders
#[derive(Debug, Clone)]
pub struct Record<'a> {
    /// Severity
    pub level: Level,
    /// Creation time
    pub time: OffsetDateTime,
    /// Logger name
    pub logger_name: Option<&'a str>,
    /// Call site
    pub caller: Option<Caller<'a>>,
    /// Function or module path
    pub function: Option<&'a str>,
    /// Rendered message
    pub message: &'a str,
    /// Per-call fields, encoded after the core's context fields
    pub fields: &'a [Field],
    /// Captured backtrace
    pub stacktrace: Option<&'a str>,
}

impl<'a> Record<'a> {
    /// Record stamped with the current time
    pub fn new(level: Level, message: &'a str) -> Self {
        Self {
            level,
            time: OffsetDateTime::now_utc(),
            logger_name: None,
            caller: None,
            function: None,
            message,
            fields: &[],
            stacktrace: None,
        }
    }
}

/// Destination of records
pub trait Core: Send + Sync {
    /// Whether a record at `level` would be written
    fn enabled(&self, level: Level) -> bool;

    /// Core writing `fields` with every record
    fn with(&self, fields: &[Field]) -> Arc<dyn Core>;

    /// Encode and write one record
    fn write(&self, record: &Record<'_>) -> LogResult<()>;

    /// Flush buffered output
    fn sync(&self) -> LogResult<()>;
}

/// Core writing encoded records to a physical writer
#[derive(Clone)]
pub struct IoCore {
    encoder: Arc<dyn Encoder>,
    writer: Arc<BoxMakeWriter>,
    level: AtomicLevel,
    fields: Arc<[Field]>,
    guard: Option<Arc<dyn Send + Sync>>,
}

impl IoCore {
    /// Create a core filtered by `level`
    pub fn new(encoder: Arc<dyn Encoder>, writer: BoxMakeWriter, level: AtomicLevel) -> Self {
        Self {
            encoder,
            writer: Arc::new(writer),
            level,
            fields: Arc::from(Vec::new()),
            guard: None,
        }
    }

    /// Keep `guard` alive as long as this core or a clone of it
    ///
    /// Used to tie a background worker's lifetime to the sink.
    pub fn with_guard(mut self, guard: impl Send + Sync + 'static) -> Self {
        self.guard = Some(Arc::new(guard));
        self
    }

    /// Level handle filtering this core
    pub fn level(&self) -> &AtomicLevel {
        &self.level
    }
}

impl Core for IoCore {
    fn enabled(&self, level: Level) -> bool {
        self.level.enabled(level)
    }

    fn with(&self, fields: &[Field]) -> Arc<dyn Core> {
        let mut core = self.clone();
        core.fields = self.fields.iter().chain(fields).cloned().collect();
        Arc::new(core)
    }

    fn write(&self, record: &Record<'_>) -> LogResult<()> {
        let mut buf = Vec::with_capacity(256);
        self.encoder.encode(record, &self.fields, &mut buf)?;

        let mut writer = MakeWriter::make_writer(&*self.writer);
        writer.write_all(&buf)?;
        if record.level > Level::Error {
            writer.flush()?;
        }
        Ok(())
    }

    fn sync(&self) -> LogResult<()> {
        MakeWriter::make_writer(&*self.writer).flush()?;
        Ok(())
    }
}

impl fmt::Debug for IoCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IoCore")
            .field("level", &self.level)
            .field("fields", &self.fields.len())
            .field("guarded", &self.guard.is_some())
            .finish()
    }
}

/// Core duplicating every call to a list of cores
#[derive(Clone, Default)]
pub struct TeeCore(Vec<Arc<dyn Core>>);

impl TeeCore {
    /// Tee over `cores`, in order
    pub fn new(cores: Vec<Arc<dyn Core>>) -> Self {
        Self(cores)
    }

    /// Number of cores
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there is nothing to write to
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn each(&self, mut f: impl FnMut(&dyn Core) -> LogResult<()>) -> LogResult<()> {
        let errors: Vec<LogError> = self.0.iter().filter_map(|c| f(c.as_ref()).err()).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(LogError::Sinks(errors))
        }
    }
}

impl Core for TeeCore {
    fn enabled(&self, level: Level) -> bool {
        self.0.iter().any(|c| c.enabled(level))
    }

    fn with(&self, fields: &[Field]) -> Arc<dyn Core> {
        Arc::new(TeeCore(self.0.iter().map(|c| c.with(fields)).collect()))
    }

    fn write(&self, record: &Record<'_>) -> LogResult<()> {
        self.each(|core| {
            if core.enabled(record.level) {
                core.write(record)
            } else {
                Ok(())
            }
        })
    }

    fn sync(&self) -> LogResult<()> {
        self.each(|core| core.sync())
    }
}

impl fmt::Debug for TeeCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TeeCore").field(&self.0.len()).finish()
    }
}

/// A built output: the core plus its runtime level handle
#[derive(Clone)]
pub struct Sink {
    /// Core receiving records
    pub core: Arc<dyn Core>,
    /// Threshold shared with `core`
    pub level: AtomicLevel,
}

impl Sink {
    /// Pair a core with the level handle that filters it
    pub fn new(core: Arc<dyn Core>, level: AtomicLevel) -> Self {
        Self { core, level }
    }
}

impl From<IoCore> for Sink {
    fn from(core: IoCore) -> Self {
        let level = core.level.clone();
        Self::new(Arc::new(core), level)
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink").field("level", &self.level).finish()
    }
}
