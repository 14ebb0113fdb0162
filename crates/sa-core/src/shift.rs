//! Shifts and their day/week rollups.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::ShiftError;

const SECONDS_IN_HOUR: f64 = 3600.0;

/// A contiguous work interval taken from a calendar event.
///
/// Timestamps are wall-clock values exactly as the source wrote them.
/// The end is always strictly after the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shift {
    start: NaiveDateTime,
    end: NaiveDateTime,
    is_crunch: bool,
}

impl Shift {
    /// Creates a shift, rejecting intervals that do not move forward in time.
    pub fn new(
        start: NaiveDateTime,
        end: NaiveDateTime,
        is_crunch: bool,
    ) -> Result<Self, ShiftError> {
        if end <= start {
            return Err(ShiftError::MalformedEvent {
                title: String::new(),
                start,
                end,
            });
        }
        Ok(Self {
            start,
            end,
            is_crunch,
        })
    }

    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Whether the event was tagged as overtime.
    pub const fn is_crunch(&self) -> bool {
        self.is_crunch
    }

    /// Calendar date the shift belongs to (the date it starts on).
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Length of the shift in hours.
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_hours(&self) -> f64 {
        (self.end - self.start).num_seconds() as f64 / SECONDS_IN_HOUR
    }
}

/// All shifts starting on one calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Day {
    date: NaiveDate,
    shifts: Vec<Shift>,
}

impl Day {
    /// Only grouping builds days, so `shifts` is never empty.
    pub(crate) const fn new(date: NaiveDate, shifts: Vec<Shift>) -> Self {
        Self { date, shifts }
    }

    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    /// Sum of the day's shift durations in hours.
    pub fn duration_hours(&self) -> f64 {
        self.shifts.iter().map(Shift::duration_hours).sum()
    }

    /// True if any shift on this day is a crunch shift.
    pub fn has_crunch(&self) -> bool {
        self.shifts.iter().any(Shift::is_crunch)
    }
}

/// Days sharing an ISO week number.
///
/// The week number alone is the key, so week 1 of two different years
/// would land in the same `Week`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Week {
    week: u32,
    days: Vec<Day>,
}

impl Week {
    pub(crate) const fn new(week: u32, days: Vec<Day>) -> Self {
        Self { week, days }
    }

    /// ISO-8601 week of year, 1 through 53.
    pub const fn week(&self) -> u32 {
        self.week
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn duration_hours(&self) -> f64 {
        self.days.iter().map(Day::duration_hours).sum()
    }
}
