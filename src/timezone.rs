//! Conversions between epoch-millisecond timestamps and calendar dates in the local timezone.

use time::{Date, OffsetDateTime, UtcOffset, macros::format_description};
use time_tz::{Offset, TimeZone};

/// Get the current UTC offset for a canonical timezone name, e.g. "Pacific/Auckland".
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// The current time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

/// The calendar date that `timestamp` (milliseconds since the Unix epoch) falls on at `offset`.
///
/// Returns `None` if `timestamp` is outside the range of dates supported by [time].
pub fn timestamp_to_date(timestamp: i64, offset: UtcOffset) -> Option<Date> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(timestamp) * 1_000_000)
        .ok()
        .map(|date_time| date_time.to_offset(offset).date())
}

/// Format `timestamp` as a `YYYY-MM-DD` string for a date input.
///
/// Timestamps outside the supported range produce an empty string.
pub fn format_date(timestamp: i64, offset: UtcOffset) -> String {
    timestamp_to_date(timestamp, offset)
        .map(|date| date.to_string())
        .unwrap_or_default()
}

/// Parse a `YYYY-MM-DD` date and return the timestamp of midnight on that date at `offset`.
///
/// This is local midnight rather than midnight UTC, which is what a browser's
/// `new Date("YYYY-MM-DD")` gives. Using local midnight keeps the date stable
/// when it is formatted back with [format_date] at the same `offset`.
pub fn parse_date(date: &str, offset: UtcOffset) -> Option<i64> {
    let date = Date::parse(date.trim(), format_description!("[year]-[month]-[day]")).ok()?;
    let midnight = date.midnight().assume_offset(offset);

    Some((midnight.unix_timestamp_nanos() / 1_000_000) as i64)
}
