//! Parsing and display of dates and times typed or shown to the user.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("invalid time '{0}' (expected HH:MM)")]
    Clock(String),
    #[error("invalid timestamp '{0}' (expected YYYY-MM-DDTHH:MM[:SS] or HH:MM)")]
    Timestamp(String),
    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    Date(String),
}

/// Parse `HH:MM` (24h)
pub fn parse_clock(s: &str) -> Result<NaiveTime, TimeParseError> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").map_err(|_| TimeParseError::Clock(s.to_string()))
}

/// Parse a full ISO timestamp, or `HH:MM` taken on `day`
pub fn parse_timestamp(s: &str, day: NaiveDate) -> Result<NaiveDateTime, TimeParseError> {
    let s = s.trim();
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(ts);
        }
    }
    parse_clock(s)
        .map(|t| day.and_time(t))
        .map_err(|_| TimeParseError::Timestamp(s.to_string()))
}

pub fn parse_date(s: &str) -> Result<NaiveDate, TimeParseError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| TimeParseError::Date(s.to_string()))
}

/// Current local time truncated to whole seconds
pub fn local_now() -> NaiveDateTime {
    let now = chrono::Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// `DD-MM-YYYY`
pub fn fmt_date(day: NaiveDate) -> String {
    day.format("%d-%m-%Y").to_string()
}

/// `HH:MM`
pub fn fmt_clock(ts: NaiveDateTime) -> String {
    ts.format("%H:%M").to_string()
}

/// Minutes as `Xh Ym`, or `Ym` under an hour. Negative durations keep their
/// sign.
pub fn fmt_duration(minutes: f64) -> String {
    let total = minutes.trunc() as i64;
    let sign = if total < 0 { "-" } else { "" };
    let total = total.abs();
    let (h, m) = (total / 60, total % 60);
    if h > 0 {
        format!("{sign}{h}h {m}m")
    } else {
        format!("{sign}{m}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 20).unwrap()
    }

    #[test]
    fn clock_parsing() {
        assert_eq!(parse_clock("07:45"), Ok(NaiveTime::from_hms_opt(7, 45, 0).unwrap()));
        assert_eq!(parse_clock("25:00"), Err(TimeParseError::Clock("25:00".into())));
        assert!(parse_clock("7pm").is_err());
    }

    #[test]
    fn timestamp_forms() {
        let expected = day().and_hms_opt(22, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2026-02-20T22:00:00", day()), Ok(expected));
        assert_eq!(parse_timestamp("2026-02-20T22:00", day()), Ok(expected));
        assert_eq!(parse_timestamp("22:00", day()), Ok(expected));
        assert!(parse_timestamp("yesterday", day()).is_err());
    }

    #[test]
    fn formatting() {
        assert_eq!(fmt_date(day()), "20-02-2026");
        assert_eq!(fmt_clock(day().and_hms_opt(9, 5, 0).unwrap()), "09:05");
        assert_eq!(fmt_duration(300.0), "5h 0m");
        assert_eq!(fmt_duration(42.9), "42m");
        assert_eq!(fmt_duration(-60.0), "-1h 0m");
    }

    #[test]
    fn dates() {
        assert_eq!(parse_date("2026-02-20"), Ok(day()));
        assert!(parse_date("20-02-2026").is_err());
    }
}
