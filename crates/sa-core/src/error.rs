//! Error types for shift extraction and statistics.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors produced by the shift analysis pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShiftError {
    /// No event in the calendar matched the shift keyword.
    #[error("no shifts found in {calendar} matching keyword {keyword:?}")]
    NoShiftsFound { calendar: String, keyword: String },

    /// A statistic was requested over an empty collection.
    #[error("cannot compute a mean over zero {collection}")]
    EmptyInput { collection: &'static str },

    /// An event ends at or before its start.
    #[error("event {title:?} ends at {end}, not after its start {start}")]
    MalformedEvent {
        title: String,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}
