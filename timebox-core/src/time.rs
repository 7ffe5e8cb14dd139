//! Time parsing and day/hour arithmetic shared by the engine.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::ValidationError;

/// Parse a wall-clock time like "09:30" or "09:30:15".
pub fn parse_time_of_day(field: &'static str, value: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| ValidationError::InvalidTime {
            field,
            value: value.to_string(),
        })
}

/// Parse a calendar date like "2026-09-01".
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// Free-form lead/duration offsets typed by the user. Unparsable input means
/// 0, not an error.
pub fn parse_offset(value: &str) -> i64 {
    value.trim().parse::<i64>().unwrap_or(0)
}

/// Midnight UTC for a calendar date.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Whole days from `now` to `target`, truncating toward zero. Negative when
/// `target` is in the past.
pub fn days_until(target: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (target - now).num_days()
}

/// Fractional hours elapsed from `earlier` to `later`.
pub fn hours_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    (later - earlier).num_seconds() as f64 / 3600.0
}

/// Resolve a naive local date + time in an IANA timezone to a UTC instant.
pub fn local_instant(
    field: &'static str,
    date: NaiveDate,
    time: Option<NaiveTime>,
    timezone: &str,
) -> Result<DateTime<Utc>, ValidationError> {
    let tz: Tz = timezone.parse().map_err(|_| ValidationError::InvalidTimezone {
        field: "timezone",
        value: timezone.to_string(),
    })?;

    let ndt: NaiveDateTime = date.and_time(time.unwrap_or(NaiveTime::MIN));
    tz.from_local_datetime(&ndt)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| ValidationError::AmbiguousLocalTime {
            field,
            value: ndt.to_string(),
        })
}
