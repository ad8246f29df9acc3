//! Physical writer configuration

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{LogError, LogResult};

/// Writer configuration, used by the `file` writer and business writers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Directory holding the log files
    pub log_path: PathBuf,
    /// File name like `app.log`
    pub file_name: String,
    /// `sync`, `async` or `fast` (default `fast`)
    pub write_mode: String,
    /// `size` or `time` (default `time`)
    pub roll_type: String,
    /// Max age of rolled files in days
    pub max_age: u32,
    /// Max number of rolled files to keep
    pub max_backups: usize,
    /// Compress rolled files
    pub compress: bool,
    /// Max file size in MB
    pub max_size: u64,
    /// Time unit for time based rolling
    pub time_unit: TimeUnit,
}

impl WriterConfig {
    /// Full path of the log file
    pub fn file_path(&self) -> LogResult<PathBuf> {
        if self.file_name.trim().is_empty() {
            return Err(LogError::InvalidFilePath(
                self.log_path.join(&self.file_name).display().to_string(),
            ));
        }
        Ok(self.log_path.join(&self.file_name))
    }

    /// Validated write mode; empty resolves to [`WriteMode::Fast`]
    pub fn write_mode(&self) -> LogResult<WriteMode> {
        if self.write_mode.is_empty() {
            return Ok(WriteMode::default());
        }
        self.write_mode.parse()
    }

    /// Roll type; anything other than `size` rolls by time
    pub fn roll_type(&self) -> RollType {
        if self.roll_type == RollType::BySize.as_str() {
            RollType::BySize
        } else {
            RollType::ByTime
        }
    }
}

/// How records reach the file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WriteMode {
    /// Write on the calling thread
    Sync,
    /// Buffer on a background worker, block when the buffer is full
    Async,
    /// Buffer on a background worker, drop records when the buffer is full
    #[default]
    Fast,
}

impl WriteMode {
    /// Configuration name
    pub const fn as_str(self) -> &'static str {
        match self {
            WriteMode::Sync => "sync",
            WriteMode::Async => "async",
            WriteMode::Fast => "fast",
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WriteMode {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sync" => Ok(WriteMode::Sync),
            "async" => Ok(WriteMode::Async),
            "fast" => Ok(WriteMode::Fast),
            other => Err(LogError::InvalidWriteMode(other.to_string())),
        }
    }
}

/// File rolling strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RollType {
    /// Roll when the file reaches `max_size`
    BySize,
    /// Roll every `time_unit`
    #[default]
    ByTime,
}

impl RollType {
    /// Configuration name
    pub const fn as_str(self) -> &'static str {
        match self {
            RollType::BySize => "size",
            RollType::ByTime => "time",
        }
    }
}

/// Time unit by which files are split
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TimeUnit {
    /// Split every minute
    Minute,
    /// Split every hour
    Hour,
    /// Split every day
    #[default]
    Day,
    /// Split every month
    Month,
    /// Split every year
    Year,
}

impl TimeUnit {
    /// Configuration name
    pub const fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Minute => "minute",
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
            TimeUnit::Month => "month",
            TimeUnit::Year => "year",
        }
    }

    /// Date layout appended to rolled file names, as a `time` format description
    pub const fn format(self) -> &'static str {
        match self {
            TimeUnit::Minute => "[year]-[month]-[day]-[hour]-[minute]",
            TimeUnit::Hour => "[year]-[month]-[day]-[hour]",
            TimeUnit::Day => "[year]-[month]-[day]",
            TimeUnit::Month => "[year]-[month]",
            TimeUnit::Year => "[year]",
        }
    }
}

impl From<&str> for TimeUnit {
    fn from(value: &str) -> Self {
        match value {
            "minute" => TimeUnit::Minute,
            "hour" => TimeUnit::Hour,
            "month" => TimeUnit::Month,
            "year" => TimeUnit::Year,
            _ => TimeUnit::Day,
        }
    }
}

impl From<String> for TimeUnit {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<TimeUnit> for String {
    fn from(value: TimeUnit) -> Self {
        value.as_str().to_string()
    }
}
