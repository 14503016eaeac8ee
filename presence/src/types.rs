//! The confirmation result contract.
//!
//! Every attendance confirmation attempt resolves to exactly one of these
//! variants, so callers can branch on the outcome instead of parsing message
//! strings. Serialization tags the variant under `result` and carries each
//! variant's fields alongside it.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

/// Outcome of one confirmation attempt, start to finish.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ConfirmationResult {
    /// Presence recorded. `distance_m` is the audited distance for the
    /// geolocation path; code confirmations carry no distance.
    Confirmed {
        #[serde(skip_serializing_if = "Option::is_none")]
        distance_m: Option<f64>,
    },
    /// A record for this student and session already exists; nothing was
    /// written. Carries the original confirmation instant.
    AlreadyConfirmed { confirmed_at: DateTime<Utc> },
    /// The session has not opened for confirmation yet.
    NotYetStarted { starts_at: NaiveDateTime },
    /// The window, tolerance included, has closed.
    Expired { expired_at: NaiveDateTime },
    /// The session is scheduled for a different calendar date.
    WrongDate,
    /// The institution validates attendance some other way; names the
    /// configured method so the client can switch flows.
    WrongValidationMethod { method: String },
    /// The device sits outside the institution's geofence.
    OutOfRange {
        distance_m: f64,
        allowed_radius_m: f64,
    },
    /// The device could not produce coordinates.
    LocationUnavailable { reason: String },
    /// The submitted attendance code did not match the rotating code.
    InvalidCode,
    /// The institution's attendance setup is broken; staff need to act.
    ConfigurationError { reason: String },
    /// No such session visible to this student.
    NotFound,
}

impl ConfirmationResult {
    /// True only for the variant that wrote a new record.
    pub fn is_confirmed(&self) -> bool {
        matches!(self, ConfirmationResult::Confirmed { .. })
    }
}
