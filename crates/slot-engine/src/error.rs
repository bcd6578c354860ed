//! Error types for slot-engine operations.

use std::path::PathBuf;

use thiserror::Error;

/// Whole-request validation failures.
///
/// Any of these aborts the request before a single calendar is looked at.
/// An unknown calendar id is *not* a validation error; it is reported inline
/// as a [`CalendarResult::Unavailable`](crate::model::CalendarResult) entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The search period is missing, unparseable, or not strictly increasing.
    #[error("Invalid Period to Search")]
    InvalidPeriod,

    /// The calendar id list is missing or empty.
    #[error("List of Calendar Ids cannot be Empty")]
    EmptyCalendarIds,

    /// A calendar id is not a well-formed UUID.
    #[error("Invalid Calendar Id: {0}")]
    InvalidCalendarId(String),

    /// The slot duration is missing, zero, or negative.
    #[error("Duration must be greater than zero")]
    InvalidDuration,

    /// The slot duration does not fit a 32-bit signed minute count.
    #[error("Duration must not exceed 2147483647 minutes, got {0}")]
    DurationTooLarge(i64),
}

/// Failures while loading calendar data into a [`CalendarStore`](crate::source::CalendarStore).
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed calendar file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Appointment {index} in {path} ends before it starts")]
    InvertedAppointment { path: PathBuf, index: usize },
}

/// Convenience alias for validation results.
pub type Result<T> = std::result::Result<T, ValidationError>;
