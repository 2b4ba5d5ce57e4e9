//! Scheduled-time parsing for the arrivals feed.
//!
//! The feed reports times as naive local timestamps of the form
//! `YYYY-MM-DD HH:MM:SS.ffffff` with no timezone. They are kept naive and
//! compared against the server's local wall-clock time.

use chrono::NaiveDateTime;

/// Format of `sched_time` values on the arrivals feed.
pub const SCHED_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Error returned when a scheduled time does not match [`SCHED_TIME_FORMAT`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid scheduled time {value:?}: {reason}")]
pub struct TimestampError {
    value: String,
    reason: String,
}

impl TimestampError {
    /// The text that failed to parse.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Parse a feed timestamp.
///
/// ```
/// use next_train_server::domain::parse_sched_time;
///
/// let t = parse_sched_time("2024-03-15 14:30:00.000000").unwrap();
/// assert_eq!(t.to_string(), "2024-03-15 14:30:00");
///
/// assert!(parse_sched_time("14:30").is_err());
/// ```
pub fn parse_sched_time(s: &str) -> Result<NaiveDateTime, TimestampError> {
    NaiveDateTime::parse_from_str(s, SCHED_TIME_FORMAT).map_err(|e| TimestampError {
        value: s.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn parse_full_precision() {
        let t = parse_sched_time("2024-03-15 14:30:05.250000").unwrap();
        assert_eq!(t.date(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(t.hour(), 14);
        assert_eq!(t.minute(), 30);
        assert_eq!(t.second(), 5);
        assert_eq!(t.nanosecond(), 250_000_000);
    }

    #[test]
    fn parse_short_fraction() {
        let t = parse_sched_time("2024-03-15 14:30:00.000").unwrap();
        assert_eq!(t.minute(), 30);
    }

    #[test]
    fn reject_malformed() {
        for bad in [
            "",
            "not a time",
            "14:30:00",
            "2024-03-15",
            "2024-13-01 10:00:00.000000",
            "2024-03-15T14:30:00.000000",
            "15/03/2024 14:30:00.000000",
        ] {
            let err = parse_sched_time(bad).unwrap_err();
            assert_eq!(err.value(), bad);
        }
    }

    #[test]
    fn error_display_names_value() {
        let err = parse_sched_time("soon").unwrap_err();
        assert!(err.to_string().starts_with("invalid scheduled time \"soon\""));
    }
}
