//! Error types for the presence engine.
//!
//! Every variant is a configuration problem: bad data reached the engine, so
//! the caller should surface a configuration error to staff rather than deny
//! the student.

use thiserror::Error;

/// Configuration failures detected while evaluating a presence claim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresenceError {
    /// A stored wall-clock time could not be parsed as `HH:MM`.
    #[error("session {field} {value:?} is not a valid HH:MM wall-clock time")]
    MalformedTime {
        field: &'static str,
        value: String,
    },
}

impl PresenceError {
    pub fn bad_start_time(value: impl Into<String>) -> Self {
        Self::MalformedTime {
            field: "start time",
            value: value.into(),
        }
    }

    pub fn bad_end_time(value: impl Into<String>) -> Self {
        Self::MalformedTime {
            field: "end time",
            value: value.into(),
        }
    }
}
