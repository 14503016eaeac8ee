//! # Presence Engine
//!
//! Core rules for deciding whether a student's attendance claim is accepted:
//! the confirmation window evaluator, the geofence validator, and the
//! rotating attendance code.
//!
//! ## Key Concepts
//! - **Window**: a class session is confirmable from its scheduled start up
//!   to its scheduled end plus the institution's tolerance, boundaries
//!   inclusive, and only on the session's date.
//! - **Geofence**: a centre coordinate and a radius in metres; a claim is in
//!   range when the haversine distance does not exceed the radius.
//! - **Rotating code**: a 6-digit HMAC-derived code that changes every
//!   minute, shown by the teacher and typed (or scanned) by students.
//!
//! Everything in this crate is pure: callers supply the evaluation instant
//! and every piece of configuration, so each rule is testable without a
//! database or a clock.

pub mod code;
pub mod error;
pub mod geo;
pub mod types;
pub mod window;

pub use error::PresenceError;
pub use geo::{Coordinates, Geofence, GeofenceOutcome, LocationError};
pub use types::ConfirmationResult;
pub use window::{ScheduledSession, WindowOutcome};
