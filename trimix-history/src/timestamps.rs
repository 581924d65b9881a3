//! Date and time rendering for saved readings
//!
//! Record timestamps are milliseconds since the Unix epoch when the host
//! supplies wall-clock time, and are rendered in UTC.

use chrono::{DateTime, Utc};
use trimix_core::HistoryRecord;

/// Calendar date, `%Y-%m-%d`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time of day, `%H:%M:%S`
pub const TIME_FORMAT: &str = "%H:%M:%S";

fn to_datetime(timestamp_ms: u64) -> Option<DateTime<Utc>> {
    let millis = i64::try_from(timestamp_ms).ok()?;
    DateTime::from_timestamp_millis(millis)
}

/// Render `timestamp_ms` as a calendar date
pub fn date_string(timestamp_ms: u64) -> Option<String> {
    to_datetime(timestamp_ms).map(|dt| dt.format(DATE_FORMAT).to_string())
}

/// Render `timestamp_ms` as a time of day
pub fn time_string(timestamp_ms: u64) -> Option<String> {
    to_datetime(timestamp_ms).map(|dt| dt.format(TIME_FORMAT).to_string())
}

/// Date/time accessors for [`HistoryRecord`]
pub trait RecordTimestamp {
    /// Recording date as `YYYY-MM-DD`, UTC
    fn date(&self) -> Option<String>;
    /// Recording time as `HH:MM:SS`, UTC
    fn time(&self) -> Option<String>;
}

impl RecordTimestamp for HistoryRecord {
    fn date(&self) -> Option<String> {
        date_string(self.timestamp)
    }

    fn time(&self) -> Option<String> {
        time_string(self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_utc() {
        // 2023-11-14 22:13:20 UTC
        let ts = 1_700_000_000_000;
        assert_eq!(date_string(ts).as_deref(), Some("2023-11-14"));
        assert_eq!(time_string(ts).as_deref(), Some("22:13:20"));
    }

    #[test]
    fn epoch_and_overflow() {
        assert_eq!(date_string(0).as_deref(), Some("1970-01-01"));
        assert_eq!(time_string(0).as_deref(), Some("00:00:00"));
        assert_eq!(date_string(u64::MAX), None);
    }

    #[test]
    fn record_accessors() {
        let record = HistoryRecord { timestamp: 86_400_000, o2: 0.0, he: 0.0, n2: 0.0, co2: 0.0, co: 0.0 };
        assert_eq!(record.date().as_deref(), Some("1970-01-02"));
        assert_eq!(record.time().as_deref(), Some("00:00:00"));
    }
}
