//! Rolling file appender construction

use std::path::PathBuf;

use time::{OffsetDateTime, UtcOffset, format_description};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

use crate::config::{RollType, TimeUnit, WriterConfig};
use crate::core::{LogError, LogResult};
use crate::logger::INTERNAL_TARGET;

/// Settings of a rolling file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollOptions {
    /// Directory holding the files
    pub dir: PathBuf,
    /// Base file name
    pub file_name: String,
    /// Roll by size or time
    pub roll_type: RollType,
    /// Unit for time based rolling
    pub time_unit: TimeUnit,
    /// Rolled files to keep, zero keeps all
    pub max_backups: usize,
    /// Days to keep rolled files, zero keeps all
    pub max_age: u32,
    /// Size limit in MB for size based rolling
    pub max_size: u64,
    /// Compress rolled files
    pub compress: bool,
}

impl RollOptions {
    /// Validate and collect the rolling settings of a writer
    pub fn from_config(cfg: &WriterConfig) -> LogResult<Self> {
        let path = cfg.file_path()?;
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| LogError::InvalidFilePath(path.display().to_string()))?;

        Ok(Self {
            dir,
            file_name,
            roll_type: cfg.roll_type(),
            time_unit: cfg.time_unit,
            max_backups: cfg.max_backups,
            max_age: cfg.max_age,
            max_size: cfg.max_size,
            compress: cfg.compress,
        })
    }

    /// Appender rotation for these options
    ///
    /// Size based rolling is only accepted without a size limit, which keeps
    /// a single file. Month and year units have no matching rotation.
    pub fn rotation(&self) -> LogResult<Rotation> {
        match (self.roll_type, self.time_unit) {
            (RollType::BySize, _) if self.max_size > 0 => Err(LogError::Config(format!(
                "size based rolling is not supported (max_size = {}), roll by time or set max_size to 0",
                self.max_size
            ))),
            (RollType::BySize, _) => Ok(Rotation::NEVER),
            (RollType::ByTime, TimeUnit::Minute) => Ok(Rotation::MINUTELY),
            (RollType::ByTime, TimeUnit::Hour) => Ok(Rotation::HOURLY),
            (RollType::ByTime, TimeUnit::Day) => Ok(Rotation::DAILY),
            (RollType::ByTime, unit @ (TimeUnit::Month | TimeUnit::Year)) => {
                Err(LogError::Config(format!(
                    "rolling by {} is not supported, use minute, hour or day",
                    unit.as_str()
                )))
            }
        }
    }

    /// File records go to at `now`
    ///
    /// Time based files carry the unit's date layout after the base name,
    /// rendered in UTC.
    pub fn active_file(&self, now: OffsetDateTime) -> LogResult<PathBuf> {
        if self.roll_type == RollType::BySize {
            return Ok(self.dir.join(&self.file_name));
        }

        let layout = self.time_unit.format();
        let items = format_description::parse(layout).map_err(|e| LogError::InvalidTimePattern {
            pattern: layout.to_string(),
            reason: e.to_string(),
        })?;
        let date = now
            .to_offset(UtcOffset::UTC)
            .format(&items)
            .map_err(|e| LogError::Config(e.to_string()))?;
        Ok(self.dir.join(format!("{}.{date}", self.file_name)))
    }

    /// Create the directory and open the appender
    pub fn open(&self) -> LogResult<RollingFileAppender> {
        let rotation = self.rotation()?;
        if self.compress || self.max_age > 0 {
            tracing::warn!(
                target: INTERNAL_TARGET,
                file = %self.file_name,
                compress = self.compress,
                max_age = self.max_age,
                "compress and max_age are not supported by the file writer and are ignored"
            );
        }

        std::fs::create_dir_all(&self.dir).map_err(|e| self.open_error(e))?;

        let mut builder = RollingFileAppender::builder()
            .rotation(rotation)
            .filename_prefix(&self.file_name);
        if self.max_backups > 0 {
            builder = builder.max_log_files(self.max_backups);
        }
        let appender = builder.build(&self.dir).map_err(|e| self.open_error(e))?;

        if let Ok(path) = self.active_file(OffsetDateTime::now_utc()) {
            tracing::debug!(path = %path.display(), "rolling file opened");
        }
        Ok(appender)
    }

    fn open_error(&self, reason: impl std::fmt::Display) -> LogError {
        LogError::OpenFile {
            path: self.dir.join(&self.file_name).display().to_string(),
            reason: reason.to_string(),
        }
    }
}
