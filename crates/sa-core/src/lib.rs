//! Core domain logic for shift analysis.
//!
//! This crate contains the fundamental types and logic for:
//! - Extraction: turning keyword-matched calendar events into shifts
//! - Grouping: rolling shifts up into days and ISO weeks
//! - Statistics: mean durations and the share of crunch days

mod error;
mod extract;
mod group;
mod shift;
pub mod stats;

pub use error::ShiftError;
pub use extract::{CalendarEvent, Keywords, extract_shifts};
pub use group::{group_by_day, group_by_week};
pub use shift::{Day, Shift, Week};
pub use stats::{
    Analysis, CrunchRatio, crunch_day_ratio, mean_day_duration, mean_shift_duration,
    mean_week_duration,
};
