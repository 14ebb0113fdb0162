//! Shift statistics.

use serde::Serialize;

use crate::error::ShiftError;
use crate::group::{group_by_day, group_by_week};
use crate::shift::{Day, Shift, Week};

/// Arithmetic mean of `values`, failing with `EmptyInput` when there are none.
#[allow(clippy::cast_precision_loss)]
fn mean(
    values: impl ExactSizeIterator<Item = f64>,
    collection: &'static str,
) -> Result<f64, ShiftError> {
    let count = values.len();
    if count == 0 {
        return Err(ShiftError::EmptyInput { collection });
    }
    Ok(values.sum::<f64>() / count as f64)
}

/// Mean shift duration in hours.
pub fn mean_shift_duration(shifts: &[Shift]) -> Result<f64, ShiftError> {
    mean(shifts.iter().map(Shift::duration_hours), "shifts")
}

/// Mean worked hours per day that has at least one shift.
pub fn mean_day_duration(days: &[Day]) -> Result<f64, ShiftError> {
    mean(days.iter().map(Day::duration_hours), "days")
}

/// Mean worked hours per week that has at least one shift.
pub fn mean_week_duration(weeks: &[Week]) -> Result<f64, ShiftError> {
    mean(weeks.iter().map(Week::duration_hours), "weeks")
}

/// How many days contained a crunch shift, out of how many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CrunchRatio {
    pub count: usize,
    pub total: usize,
}

impl CrunchRatio {
    /// Share of crunch days as a percentage, or `None` when there are no days.
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.count as f64 / self.total as f64 * 100.0)
    }
}

/// Count the days containing at least one crunch shift.
pub fn crunch_day_ratio(days: &[Day]) -> CrunchRatio {
    CrunchRatio {
        count: days.iter().filter(|day| day.has_crunch()).count(),
        total: days.len(),
    }
}

/// Every statistic the report shows, computed in one pass over the shifts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub shift_count: usize,
    pub day_count: usize,
    pub week_count: usize,
    pub mean_shift_hours: f64,
    pub mean_day_hours: f64,
    pub mean_week_hours: f64,
    pub crunch_days: CrunchRatio,
}

impl Analysis {
    /// Group `shifts` into days and weeks and compute the rollup.
    pub fn from_shifts(shifts: Vec<Shift>) -> Result<Self, ShiftError> {
        let mean_shift_hours = mean_shift_duration(&shifts)?;
        let shift_count = shifts.len();

        let days = group_by_day(shifts);
        let mean_day_hours = mean_day_duration(&days)?;
        let crunch_days = crunch_day_ratio(&days);
        let day_count = days.len();

        let weeks = group_by_week(days);
        let mean_week_hours = mean_week_duration(&weeks)?;

        tracing::debug!(shift_count, day_count, week_count = weeks.len(), "grouped shifts");

        Ok(Self {
            shift_count,
            day_count,
            week_count: weeks.len(),
            mean_shift_hours,
            mean_day_hours,
            mean_week_hours,
            crunch_days,
        })
    }
}
