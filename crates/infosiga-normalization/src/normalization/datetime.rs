//! Date and time parsing.
//!
//! Source dates are Brazilian `dd/mm/yyyy`; some extracts use ISO
//! `yyyy-mm-dd`. Times are `HH:MM` or `HH:MM:SS`. Anything else is null.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%Y-%m-%d"];
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

const NANOS_PER_SECOND: i64 = 1_000_000_000;
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Parses a source date.
///
/// A trailing time part (`01/02/2023 00:00:00`) is ignored.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.split_whitespace().next()?;
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
}

/// Parses a source time of day.
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let trimmed = value.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
}

/// Days since 1970-01-01, the physical value of a Polars `Date`.
pub fn days_since_epoch(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - EPOCH_DAYS_FROM_CE
}

/// Nanoseconds since midnight, the physical value of a Polars `Time`.
pub fn nanos_since_midnight(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight()) * NANOS_PER_SECOND + i64::from(time.nanosecond())
}
