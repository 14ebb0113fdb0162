//! Shift extraction from calendar events.
//!
//! Events whose title contains the shift keyword become shifts; those whose
//! title also contains the crunch keyword are tagged as overtime. Both tests
//! are case-insensitive substring matches.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::ShiftError;
use crate::shift::Shift;

/// A calendar event suitable for shift extraction.
///
/// This trait allows extraction to work with different event representations
/// (e.g., `IcsEvent` from sa-ics, or test fixtures).
pub trait CalendarEvent {
    /// Returns the event title (`SUMMARY`).
    fn title(&self) -> &str;

    /// Returns the decoded start timestamp.
    fn start(&self) -> NaiveDateTime;

    /// Returns the decoded end timestamp.
    fn end(&self) -> NaiveDateTime;
}

/// Title keywords that identify shifts and crunch shifts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keywords {
    /// Substring marking an event as a work shift. Default: "Shift".
    pub shift: String,

    /// Substring marking a shift as crunch. Default: "Crunch".
    pub crunch: String,
}

impl Default for Keywords {
    fn default() -> Self {
        Self {
            shift: "Shift".to_string(),
            crunch: "Crunch".to_string(),
        }
    }
}

/// Extract shifts from `events`.
///
/// `source` names where the events came from and only appears in the
/// `NoShiftsFound` error. Events ending at or before their start are skipped
/// with a warning and never reach the returned shifts.
pub fn extract_shifts<E: CalendarEvent>(
    events: &[E],
    source: &str,
    keywords: &Keywords,
) -> Result<Vec<Shift>, ShiftError> {
    let shift_keyword = keywords.shift.to_lowercase();
    let crunch_keyword = keywords.crunch.to_lowercase();

    let mut shifts = Vec::new();
    for event in events {
        let title = event.title().to_lowercase();
        if !title.contains(&shift_keyword) {
            continue;
        }

        let is_crunch = title.contains(&crunch_keyword);
        let (start, end) = (event.start(), event.end());
        match Shift::new(start, end, is_crunch) {
            Ok(shift) => shifts.push(shift),
            Err(_) => {
                let err = ShiftError::MalformedEvent {
                    title: event.title().to_string(),
                    start,
                    end,
                };
                tracing::warn!(error = %err, "skipping malformed shift");
            }
        }
    }

    if shifts.is_empty() {
        return Err(ShiftError::NoShiftsFound {
            calendar: source.to_string(),
            keyword: keywords.shift.clone(),
        });
    }

    tracing::debug!(
        event_count = events.len(),
        shift_count = shifts.len(),
        "extracted shifts"
    );
    Ok(shifts)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;

    /// Minimal event fixture.
    pub(crate) struct TestEvent {
        pub title: &'static str,
        pub start: NaiveDateTime,
        pub end: NaiveDateTime,
    }

    impl CalendarEvent for TestEvent {
        fn title(&self) -> &str {
            self.title
        }

        fn start(&self) -> NaiveDateTime {
            self.start
        }

        fn end(&self) -> NaiveDateTime {
            self.end
        }
    }

    pub(crate) fn event(
        title: &'static str,
        (y, m, d): (i32, u32, u32),
        from: u32,
        to: u32,
    ) -> TestEvent {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        TestEvent {
            title,
            start: date.and_hms_opt(from, 0, 0).unwrap(),
            end: date.and_hms_opt(to, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_keeps_matching_events_and_tags_crunch() {
        let events = [
            event("Shift A", (2024, 3, 4), 9, 17),
            event("Shift B — Crunch", (2024, 3, 4), 9, 13),
            event("Lunch", (2024, 3, 4), 12, 13),
        ];

        let shifts = extract_shifts(&events, "work.ics", &Keywords::default()).unwrap();

        assert_eq!(shifts.len(), 2);
        assert!(!shifts[0].is_crunch());
        assert!(shifts[1].is_crunch());
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let events = [event("MORNING SHIFT", (2024, 3, 4), 6, 14)];
        let keywords = Keywords {
            shift: "shift".to_string(),
            crunch: "crunch".to_string(),
        };

        let shifts = extract_shifts(&events, "work.ics", &keywords).unwrap();
        assert_eq!(shifts.len(), 1);
    }

    #[test]
    fn test_crunch_keyword_alone_is_not_a_shift() {
        let events = [
            event("crunch planning", (2024, 3, 4), 9, 10),
            event("late shift", (2024, 3, 4), 14, 22),
        ];

        let shifts = extract_shifts(&events, "work.ics", &Keywords::default()).unwrap();
        assert_eq!(shifts.len(), 1);
        assert!(!shifts[0].is_crunch());
    }

    #[test]
    fn test_empty_source_is_no_shifts_found() {
        let events: [TestEvent; 0] = [];
        let err = extract_shifts(&events, "empty.ics", &Keywords::default()).unwrap_err();
        assert_eq!(
            err,
            ShiftError::NoShiftsFound {
                calendar: "empty.ics".to_string(),
                keyword: "Shift".to_string(),
            }
        );
    }

    #[test]
    fn test_no_match_reports_keyword() {
        let events = [event("Lunch", (2024, 3, 4), 12, 13)];
        let keywords = Keywords {
            shift: "Dienst".to_string(),
            ..Keywords::default()
        };
        let err = extract_shifts(&events, "work.ics", &keywords).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"no shifts found in work.ics matching keyword "Dienst""#
        );
    }

    #[test]
    fn test_backwards_event_is_skipped() {
        let events = [
            event("Shift A", (2024, 3, 4), 9, 17),
            event("Shift B", (2024, 3, 5), 17, 9),
        ];

        let shifts = extract_shifts(&events, "work.ics", &Keywords::default()).unwrap();
        assert_eq!(shifts.len(), 1);
        assert_eq!(shifts[0].date(), NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
    }

    #[test]
    fn test_only_malformed_shifts_is_no_shifts_found() {
        let events = [event("Shift", (2024, 3, 4), 9, 9)];
        let err = extract_shifts(&events, "work.ics", &Keywords::default()).unwrap_err();
        assert!(matches!(err, ShiftError::NoShiftsFound { .. }));
    }
}
