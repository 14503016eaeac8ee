//! Confirmation window evaluation.
//!
//! A session is confirmable from its scheduled start up to its scheduled end
//! plus the institution's tolerance. The tolerance only stretches the window
//! after the end; it never opens it early.

use crate::error::PresenceError;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Wall-clock schedule of a single class meeting, as stored.
///
/// Times are kept as `HH:MM` strings; parsing happens here so a corrupt
/// schedule surfaces as [`PresenceError::MalformedTime`] instead of a panic
/// or a silent denial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledSession {
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
}

impl ScheduledSession {
    pub fn new(date: NaiveDate, start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            date,
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}

/// Outcome of evaluating an instant against a session's window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WindowOutcome {
    /// `start <= now <= end + tolerance`, both boundaries inclusive.
    Valid,
    /// The session has not opened yet; carries the exact opening instant.
    NotYetStarted { starts_at: NaiveDateTime },
    /// The window (including tolerance) has closed; carries the closing instant.
    Expired { expired_at: NaiveDateTime },
    /// The session is scheduled for a different calendar date than `now`.
    WrongDate,
}

/// Evaluates whether `now` falls inside the session's confirmation window.
///
/// `now` is the evaluation instant on the institution's wall clock; callers
/// own the clock so the rule stays deterministic under test. The date check
/// runs first and short-circuits: on the wrong date the stored times are
/// never even parsed.
pub fn evaluate(
    session: &ScheduledSession,
    tolerance_minutes: u32,
    now: NaiveDateTime,
) -> Result<WindowOutcome, PresenceError> {
    if session.date != now.date() {
        return Ok(WindowOutcome::WrongDate);
    }

    let start = session.date.and_time(parse_wall_clock(&session.start_time).ok_or_else(
        || PresenceError::bad_start_time(&session.start_time),
    )?);
    let end = session.date.and_time(parse_wall_clock(&session.end_time).ok_or_else(
        || PresenceError::bad_end_time(&session.end_time),
    )?);
    let closes_at = end + Duration::minutes(i64::from(tolerance_minutes));

    if now < start {
        Ok(WindowOutcome::NotYetStarted { starts_at: start })
    } else if now > closes_at {
        Ok(WindowOutcome::Expired {
            expired_at: closes_at,
        })
    } else {
        Ok(WindowOutcome::Valid)
    }
}

fn parse_wall_clock(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}
