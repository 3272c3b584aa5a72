//! Date handling for the filter engine.
//!
//! Two parsers live here and must stay separate:
//!
//! - [`parse_date`] is strict and only accepts the `dd.mm.yyyy` notation typed
//!   into the filter field.
//! - [`parse_row_date`] is lenient and accepts whatever the backend stores in
//!   an anlage's release date (ISO 8601 in practice).

use std::ops::RangeInclusive;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};

use super::error::{DateError, FilterResult};

/// Smallest year a query date may carry. Two-digit-era years are rejected.
const MIN_QUERY_DATE_YEAR: i32 = 100;

/// Date-time layouts tried for release dates without a UTC offset.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Date-only layouts tried for release dates.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Milliseconds in a day; the end of a day is one millisecond short of this.
const MILLIS_PER_DAY: i64 = 86_400_000;

/// Display notation for dates shown to and typed by users.
pub const DISPLAY_FORMAT: &str = "%d.%m.%Y";

/// Parses a query date in `D.M.YYYY` notation.
///
/// Day and month take one or two ASCII digits, the year exactly four.
/// The triple must name a real calendar day.
///
/// # Errors
///
/// Returns [`DateError::Malformed`] if the text does not have the right
/// shape and [`DateError::InvalidCalendarDate`] for days like `31.02.2025`.
pub fn parse_date(text: &str) -> FilterResult<NaiveDate> {
    let text = text.trim();
    let (day, month, year) = split_date(text).ok_or_else(|| DateError::malformed(text))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .filter(|_| year >= MIN_QUERY_DATE_YEAR)
        .ok_or(DateError::InvalidCalendarDate { day, month, year })
}

/// Splits `D.M.YYYY` into its numeric parts without validating the calendar.
fn split_date(text: &str) -> Option<(u32, u32, i32)> {
    let mut parts = text.split('.');
    let day = parts.next()?;
    let month = parts.next()?;
    let year = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    if !is_digits(day, 1..=2) || !is_digits(month, 1..=2) || !is_digits(year, 4..=4) {
        return None;
    }

    Some((day.parse().ok()?, month.parse().ok()?, year.parse().ok()?))
}

/// Returns true if `text` is made of ASCII digits and its length is in `len`.
pub(crate) fn is_digits(text: &str, len: RangeInclusive<usize>) -> bool {
    len.contains(&text.len()) && text.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a release date as stored on a row.
///
/// Timestamps with a UTC offset are converted to local time; timestamps
/// without one are taken as local time already. Date-only values start at
/// midnight. Returns `None` for empty or unrecognised input.
pub fn parse_row_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    if let Some(dt) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    {
        return Some(dt);
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
    {
        return Some(date.and_time(NaiveTime::MIN));
    }

    DateTime::parse_from_rfc2822(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Local).naive_local())
}

/// Formats a release date in `dd.mm.yyyy` notation for display and text search.
///
/// Values that cannot be parsed are returned unchanged so that a text search
/// still sees them; an empty value stays empty.
pub fn format_display_date(raw: &str) -> String {
    match parse_row_date(raw) {
        Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

/// First instant of a calendar day.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Last millisecond of a calendar day (23:59:59.999).
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + chrono::Duration::milliseconds(MILLIS_PER_DAY - 1)
}
