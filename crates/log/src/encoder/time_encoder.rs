//! Time rendering

use std::fmt::Write as _;
use std::sync::LazyLock;

use serde_json::Value;
use time::format_description::OwnedFormatItem;
use time::{OffsetDateTime, UtcOffset};

use crate::core::{LogError, LogResult};

/// Local offset, resolved once; UTC when the platform cannot tell
static LOCAL_OFFSET: LazyLock<UtcOffset> =
    LazyLock::new(|| UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC));

/// How record timestamps are rendered
#[derive(Debug, Clone, Default)]
pub enum TimeEncoder {
    /// `YYYY-MM-DD HH:MM:SS.mmm` in local time
    #[default]
    Default,
    /// Fractional seconds since the epoch
    EpochSeconds,
    /// Fractional milliseconds since the epoch
    EpochMillis,
    /// Integer nanoseconds since the epoch
    EpochNanos,
    /// A `time` format description, rendered in local time
    Layout(OwnedFormatItem),
}

impl TimeEncoder {
    /// Select an encoder from the configured time format
    pub fn new(format: &str) -> LogResult<Self> {
        Ok(match format {
            "" => TimeEncoder::Default,
            "seconds" => TimeEncoder::EpochSeconds,
            "milliseconds" => TimeEncoder::EpochMillis,
            "nanoseconds" => TimeEncoder::EpochNanos,
            pattern => TimeEncoder::Layout(
                time::format_description::parse_owned::<1>(pattern).map_err(|e| {
                    LogError::InvalidTimePattern {
                        pattern: pattern.to_string(),
                        reason: e.to_string(),
                    }
                })?,
            ),
        })
    }

    /// Render `time`
    pub fn encode(&self, time: OffsetDateTime) -> Value {
        match self {
            TimeEncoder::Default => Value::String(default_format(time)),
            TimeEncoder::EpochSeconds => Value::from(time.unix_timestamp_nanos() as f64 / 1e9),
            TimeEncoder::EpochMillis => Value::from(time.unix_timestamp_nanos() as f64 / 1e6),
            TimeEncoder::EpochNanos => Value::from(time.unix_timestamp_nanos() as i64),
            TimeEncoder::Layout(layout) => Value::String(
                time.to_offset(*LOCAL_OFFSET)
                    .format(layout)
                    .unwrap_or_else(|_| default_format(time)),
            ),
        }
    }
}

/// Fixed-width `YYYY-MM-DD HH:MM:SS.mmm` without going through a format description
fn default_format(time: OffsetDateTime) -> String {
    let t = time.to_offset(*LOCAL_OFFSET);
    let mut buf = String::with_capacity(23);
    let _ = write!(
        buf,
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:03}",
        t.year(),
        u8::from(t.month()),
        t.day(),
        t.hour(),
        t.minute(),
        t.second(),
        t.millisecond(),
    );
    buf
}
