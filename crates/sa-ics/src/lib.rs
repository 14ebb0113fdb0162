//! iCalendar event source for shift analysis.
//!
//! Reads a single `.ics` file with the `ical` crate and decodes each `VEVENT`
//! into an [`IcsEvent`] carrying its title and wall-clock start and end.

mod decode;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use chrono::{NaiveDateTime, TimeDelta};
use ical::parser::ical::component::IcalEvent;
use ical::property::Property;
use sa_core::CalendarEvent;
use thiserror::Error;

use crate::decode::{Timestamp, parse_duration, parse_timestamp};

/// Errors raised while reading a calendar file.
#[derive(Debug, Error)]
pub enum IcsError {
    /// The file could not be opened or read.
    #[error("failed to read calendar file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not a usable iCalendar document.
    #[error("invalid calendar format in {path}: {message}")]
    InvalidFormat { path: PathBuf, message: String },

    /// A date, date-time or duration value could not be decoded.
    #[error("invalid {property} value {value:?} in {path}")]
    InvalidProperty {
        path: PathBuf,
        property: &'static str,
        value: String,
    },
}

impl IcsError {
    fn invalid_property(path: &Path, property: &'static str, value: Option<&str>) -> Self {
        Self::InvalidProperty {
            path: path.to_path_buf(),
            property,
            value: value.unwrap_or_default().to_string(),
        }
    }
}

/// A decoded `VEVENT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcsEvent {
    /// `SUMMARY`, empty when the event has none.
    pub summary: String,
    pub uid: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl CalendarEvent for IcsEvent {
    fn title(&self) -> &str {
        &self.summary
    }

    fn start(&self) -> NaiveDateTime {
        self.start
    }

    fn end(&self) -> NaiveDateTime {
        self.end
    }
}

/// Read every event from the calendar file at `path`.
///
/// Events without `DTSTART` are skipped with a warning. The end comes from
/// `DTEND`, else `DTSTART + DURATION`, else one day for all-day events and
/// zero length for timed ones.
pub fn read_events(path: impl AsRef<Path>) -> Result<Vec<IcsEvent>, IcsError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| IcsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_events(BufReader::new(file), path)
}

fn parse_events<R: BufRead>(reader: R, path: &Path) -> Result<Vec<IcsEvent>, IcsError> {
    let mut events = Vec::new();
    let mut calendars = 0_usize;

    for calendar in ical::IcalParser::new(reader) {
        let calendar = calendar.map_err(|e| IcsError::InvalidFormat {
            path: path.to_path_buf(),
            message: format!("ICS parse error: {e}"),
        })?;
        calendars += 1;

        for event in &calendar.events {
            if let Some(decoded) = decode_event(event, path)? {
                events.push(decoded);
            }
        }
    }

    if calendars == 0 {
        return Err(IcsError::InvalidFormat {
            path: path.to_path_buf(),
            message: "no VCALENDAR component".to_string(),
        });
    }

    tracing::debug!(path = ?path, calendars, event_count = events.len(), "read calendar");
    Ok(events)
}

fn decode_event(event: &IcalEvent, path: &Path) -> Result<Option<IcsEvent>, IcsError> {
    let mut summary: Option<String> = None;
    let mut uid: Option<String> = None;
    let mut dtstart = None;
    let mut dtend = None;
    let mut duration = None;

    for property in &event.properties {
        match property.name.as_str() {
            "SUMMARY" => summary.clone_from(&property.value),
            "UID" => uid.clone_from(&property.value),
            "DTSTART" => dtstart = Some(property),
            "DTEND" => dtend = Some(property),
            "DURATION" => duration = Some(property),
            _ => {}
        }
    }

    let summary = summary.unwrap_or_default();
    let Some(dtstart) = dtstart else {
        tracing::warn!(
            path = ?path,
            summary = %summary,
            uid = ?uid,
            "skipping event without DTSTART"
        );
        return Ok(None);
    };

    let start = timestamp(dtstart, "DTSTART", path)?;
    let end = if let Some(dtend) = dtend {
        timestamp(dtend, "DTEND", path)?.at
    } else if let Some(duration) = duration {
        let value = duration.value.as_deref();
        value
            .and_then(parse_duration)
            .and_then(|delta| start.at.checked_add_signed(delta))
            .ok_or_else(|| IcsError::invalid_property(path, "DURATION", value))?
    } else if start.all_day {
        start.at + TimeDelta::days(1)
    } else {
        start.at
    };

    Ok(Some(IcsEvent {
        summary,
        uid,
        start: start.at,
        end,
    }))
}

fn timestamp(
    property: &Property,
    name: &'static str,
    path: &Path,
) -> Result<Timestamp, IcsError> {
    let value = property.value.as_deref();
    value
        .and_then(parse_timestamp)
        .ok_or_else(|| IcsError::invalid_property(path, name, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    use chrono::NaiveDate;
    use sa_core::{Keywords, extract_shifts};
    use tempfile::NamedTempFile;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    fn calendar(events: &str) -> String {
        format!(
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//test//shifts//EN\r\n{events}END:VCALENDAR\r\n"
        )
    }

    fn parse(body: &str) -> Result<Vec<IcsEvent>, IcsError> {
        parse_events(Cursor::new(body.to_string()), Path::new("test.ics"))
    }

    #[test]
    fn test_reads_events_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            calendar(
                "BEGIN:VEVENT\r\nUID:1\r\nSUMMARY:Shift A\r\nDTSTART:20240304T090000Z\r\nDTEND:20240304T170000Z\r\nEND:VEVENT\r\n"
            )
        )
        .unwrap();
        file.flush().unwrap();

        let events = read_events(file.path()).unwrap();

        assert_eq!(
            events,
            vec![IcsEvent {
                summary: "Shift A".to_string(),
                uid: Some("1".to_string()),
                start: at(2024, 3, 4, 9, 0),
                end: at(2024, 3, 4, 17, 0),
            }]
        );
    }

    #[test]
    fn test_tzid_value_is_not_converted() {
        let events = parse(&calendar(
            "BEGIN:VEVENT\r\nSUMMARY:Late Shift\r\nDTSTART;TZID=Europe/Berlin:20240304T140000\r\nDTEND;TZID=Europe/Berlin:20240304T220000\r\nEND:VEVENT\r\n",
        ))
        .unwrap();

        assert_eq!(events[0].start, at(2024, 3, 4, 14, 0));
        assert_eq!(events[0].end, at(2024, 3, 4, 22, 0));
    }

    #[test]
    fn test_duration_instead_of_dtend() {
        let events = parse(&calendar(
            "BEGIN:VEVENT\r\nSUMMARY:Shift\r\nDTSTART:20240304T090000\r\nDURATION:PT7H30M\r\nEND:VEVENT\r\n",
        ))
        .unwrap();

        assert_eq!(events[0].end, at(2024, 3, 4, 16, 30));
    }

    #[test]
    fn test_all_day_event_without_end_lasts_one_day() {
        let events = parse(&calendar(
            "BEGIN:VEVENT\r\nSUMMARY:Shift\r\nDTSTART;VALUE=DATE:20240304\r\nEND:VEVENT\r\n",
        ))
        .unwrap();

        assert_eq!(events[0].start, at(2024, 3, 4, 0, 0));
        assert_eq!(events[0].end, at(2024, 3, 5, 0, 0));
    }

    #[test]
    fn test_event_without_dtstart_is_skipped() {
        let events = parse(&calendar(
            "BEGIN:VEVENT\r\nSUMMARY:Shift ghost\r\nEND:VEVENT\r\nBEGIN:VEVENT\r\nSUMMARY:Shift\r\nDTSTART:20240304T090000\r\nDTEND:20240304T100000\r\nEND:VEVENT\r\n",
        ))
        .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].summary, "Shift");
    }

    #[test]
    fn test_missing_summary_is_empty_title() {
        let events = parse(&calendar(
            "BEGIN:VEVENT\r\nDTSTART:20240304T090000\r\nDTEND:20240304T100000\r\nEND:VEVENT\r\n",
        ))
        .unwrap();

        assert_eq!(events[0].title(), "");
    }

    #[test]
    fn test_bad_timestamp_is_invalid_property() {
        let err = parse(&calendar(
            "BEGIN:VEVENT\r\nSUMMARY:Shift\r\nDTSTART:next monday\r\nEND:VEVENT\r\n",
        ))
        .unwrap_err();

        assert!(matches!(
            err,
            IcsError::InvalidProperty {
                property: "DTSTART",
                ..
            }
        ));
    }

    #[test]
    fn test_bad_duration_is_invalid_property() {
        let err = parse(&calendar(
            "BEGIN:VEVENT\r\nSUMMARY:Shift\r\nDTSTART:20240304T090000\r\nDURATION:eight hours\r\nEND:VEVENT\r\n",
        ))
        .unwrap_err();

        assert!(matches!(
            err,
            IcsError::InvalidProperty {
                property: "DURATION",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_events(dir.path().join("missing.ics")).unwrap_err();
        assert!(matches!(err, IcsError::Read { .. }));
    }

    #[test]
    fn test_empty_file_is_invalid_format() {
        let err = parse("").unwrap_err();
        assert!(matches!(err, IcsError::InvalidFormat { .. }));
    }

    #[test]
    fn test_events_feed_shift_extraction() {
        let events = parse(&calendar(concat!(
            "BEGIN:VEVENT\r\nSUMMARY:Shift A\r\nDTSTART:20240304T090000\r\nDTEND:20240304T170000\r\nEND:VEVENT\r\n",
            "BEGIN:VEVENT\r\nSUMMARY:Shift B - Crunch\r\nDTSTART:20240304T090000\r\nDTEND:20240304T130000\r\nEND:VEVENT\r\n",
            "BEGIN:VEVENT\r\nSUMMARY:Lunch\r\nDTSTART:20240304T120000\r\nDTEND:20240304T130000\r\nEND:VEVENT\r\n",
        )))
        .unwrap();

        let shifts = extract_shifts(&events, "test.ics", &Keywords::default()).unwrap();

        assert_eq!(shifts.len(), 2);
        assert!(shifts[1].is_crunch());
    }
}
