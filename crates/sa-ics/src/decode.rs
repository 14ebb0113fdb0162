//! Decoding of iCalendar date, date-time and duration values.
//!
//! Values are decoded to their written wall-clock time. A trailing `Z` or a
//! `TZID` parameter is accepted but does not shift the result.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

const DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";
const DATE_FORMAT: &str = "%Y%m%d";

/// A decoded `DTSTART`/`DTEND` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub at: NaiveDateTime,
    /// Set for `VALUE=DATE` values, which carry no time of day.
    pub all_day: bool,
}

/// Decodes `YYYYMMDDTHHMMSS[Z]` or `YYYYMMDD`.
pub fn parse_timestamp(value: &str) -> Option<Timestamp> {
    let value = value.trim();
    if value.len() == 8 {
        let date = NaiveDate::parse_from_str(value, DATE_FORMAT).ok()?;
        return Some(Timestamp {
            at: date.and_hms_opt(0, 0, 0)?,
            all_day: true,
        });
    }

    let local = value.strip_suffix('Z').unwrap_or(value);
    let at = NaiveDateTime::parse_from_str(local, DATE_TIME_FORMAT).ok()?;
    Some(Timestamp { at, all_day: false })
}

/// Decodes an RFC 5545 duration such as `PT8H`, `P1D`, `P1W` or `-PT15M`.
pub fn parse_duration(value: &str) -> Option<TimeDelta> {
    let value = value.trim();
    let (negative, rest) = match value.as_bytes().first()? {
        b'-' => (true, &value[1..]),
        b'+' => (false, &value[1..]),
        _ => (false, value),
    };
    let rest = rest.strip_prefix('P')?;

    let mut total = TimeDelta::zero();
    let mut digits = String::new();
    let mut in_time = false;
    let mut seen_unit = false;

    for c in rest.chars() {
        match c {
            '0'..='9' => digits.push(c),
            'T' if digits.is_empty() && !in_time => in_time = true,
            'W' | 'D' | 'H' | 'M' | 'S' => {
                let n: i64 = digits.parse().ok()?;
                digits.clear();
                let part = match (c, in_time) {
                    ('W', false) => TimeDelta::try_weeks(n)?,
                    ('D', false) => TimeDelta::try_days(n)?,
                    ('H', true) => TimeDelta::try_hours(n)?,
                    ('M', true) => TimeDelta::try_minutes(n)?,
                    ('S', true) => TimeDelta::try_seconds(n)?,
                    _ => return None,
                };
                total = total.checked_add(&part)?;
                seen_unit = true;
            }
            _ => return None,
        }
    }

    if !digits.is_empty() || !seen_unit {
        return None;
    }
    Some(if negative { -total } else { total })
}
