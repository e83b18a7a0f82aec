//! Logged time entries and their JSON decoding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single logged time interval.
///
/// Timestamps are kept as the raw strings they arrived with. They are only
/// parsed when a duration is computed, so a malformed timestamp is a
/// per-entry data-quality problem rather than an input-parse failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Identifier assigned by the time logger.
    pub id: i64,
    /// Free-text note; ticket identifiers are extracted from here.
    pub note: String,
    /// Interval start, RFC 3339.
    pub start: String,
    /// Interval end, RFC 3339. Not validated against `start`; an entry
    /// ending before it starts contributes a negative duration.
    pub end: String,
}

/// A timestamp field that could not be parsed.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("entry {entry_id}: invalid {field} timestamp {value:?}")]
pub struct TimestampError {
    pub entry_id: i64,
    pub field: &'static str,
    pub value: String,
}

impl TimeEntry {
    /// Parses both timestamps, normalized to UTC.
    pub fn interval(&self) -> Result<(DateTime<Utc>, DateTime<Utc>), TimestampError> {
        let start = self.parse_field("start", &self.start)?;
        let end = self.parse_field("end", &self.end)?;
        Ok((start, end))
    }

    /// Duration of the interval in minutes, millisecond precision.
    ///
    /// Negative when the entry ends before it starts; callers tolerate that.
    pub fn duration_minutes(&self) -> Result<f64, TimestampError> {
        let (start, end) = self.interval()?;
        #[expect(
            clippy::cast_precision_loss,
            reason = "interval lengths are far below 2^52 ms"
        )]
        let minutes = (end - start).num_milliseconds() as f64 / 60_000.0;
        Ok(minutes)
    }

    fn parse_field(&self, field: &'static str, value: &str) -> Result<DateTime<Utc>, TimestampError> {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| TimestampError {
                entry_id: self.id,
                field,
                value: value.to_string(),
            })
    }
}

/// Decodes input text as a JSON array of time entries.
///
/// Fields beyond the structural shape are not validated here. A failure
/// means the whole input is unusable; the caller treats it as fatal.
pub fn parse_entries(input: &str) -> Result<Vec<TimeEntry>, serde_json::Error> {
    serde_json::from_str(input)
}
