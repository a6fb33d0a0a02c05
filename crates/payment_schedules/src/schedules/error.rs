//! Schedule generation error types.

use payment_core::types::DateError;
use thiserror::Error;

/// Errors that can occur while generating or reviewing a payment schedule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// The configuration cannot produce a schedule (the anchor date is
    /// missing or is not a calendar date). No cycles are produced.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Why the configuration was rejected.
        reason: String,
    },

    /// Date arithmetic overflow.
    #[error("Date arithmetic overflow: {reason}")]
    DateOverflow {
        /// Reason for the overflow.
        reason: String,
    },

    /// A reviewer override referenced a cycle that does not exist.
    #[error("Cycle index {index} is out of range for a schedule of {len} cycles")]
    CycleOutOfRange {
        /// The requested cycle index.
        index: usize,
        /// Number of cycles in the schedule.
        len: usize,
    },

    /// Caller-side configuration checks failed.
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

impl ScheduleError {
    /// Create an invalid configuration error.
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

impl From<DateError> for ScheduleError {
    fn from(err: DateError) -> Self {
        match err {
            DateError::Overflow { reason } => ScheduleError::DateOverflow { reason },
            other => ScheduleError::InvalidConfiguration {
                reason: other.to_string(),
            },
        }
    }
}
