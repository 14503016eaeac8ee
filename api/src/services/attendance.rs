//! Confirmation orchestrator.
//!
//! Composes the pure window and geofence evaluators with the storage layer
//! into the one write path a student's self-confirmation goes through. Every
//! step short-circuits into a [`ConfirmationResult`] variant; only an actual
//! database fault surfaces as `DbErr`.

use chrono::{DateTime, Local, Utc};
use db::models::{
    attendance_record::{ConfirmInsert, Model as AttendanceRecord},
    class_session::Model as ClassSession,
    institution_settings::{
        DEFAULT_RADIUS_M, DEFAULT_TOLERANCE_MINUTES, Model as Settings, ValidationMethod,
    },
};
use presence::{
    ConfirmationResult, Coordinates, Geofence, GeofenceOutcome, LocationError, WindowOutcome,
    window,
};
use sea_orm::{DatabaseConnection, DbErr};

/// One student's confirmation attempt, as the route handler received it.
///
/// `location` and `location_error` come from the device's geolocation API
/// (the client acquires the position itself, with a timeout of at most ten
/// seconds, and forwards either the fix or the failure code). `code` is the
/// rotating attendance code read off the teacher's screen.
pub struct ConfirmRequest {
    pub institution_id: i64,
    pub class_session_id: i64,
    pub student_id: i64,
    pub location: Option<Coordinates>,
    pub location_error: Option<LocationError>,
    pub code: Option<String>,
}

/// Attendance policy values the orchestrator works with, with the stored
/// row's gaps filled by defaults. An institution that never saved settings
/// behaves as `qrcode` / 15 min / 100 m with no campus coordinates.
struct EffectivePolicy {
    method: ValidationMethod,
    tolerance_minutes: u32,
    center: Option<Coordinates>,
    radius_m: f64,
}

impl EffectivePolicy {
    fn from_stored(stored: Option<Settings>) -> Self {
        match stored {
            Some(s) => Self {
                method: s.validation_method,
                tolerance_minutes: s.tolerance_minutes.max(0) as u32,
                center: s.coordinates(),
                radius_m: f64::from(s.radius_m),
            },
            None => Self {
                method: ValidationMethod::Qrcode,
                tolerance_minutes: DEFAULT_TOLERANCE_MINUTES as u32,
                center: None,
                radius_m: f64::from(DEFAULT_RADIUS_M),
            },
        }
    }
}

/// Runs the full confirmation sequence for one student and one session.
///
/// Order is load-bearing:
/// 1. session lookup (scoped to the institution in the URL),
/// 2. existing-record check, before anything that would make the client
///    prompt for device location again,
/// 3. validation-method gate,
/// 4. confirmation window,
/// 5. geofence or code check,
/// 6. conditional insert keyed on `(class_session_id, student_id)`.
///
/// The pre-check in step 2 is a shortcut, not the correctness mechanism: two
/// racing confirms both reach step 6, and the composite primary key decides
/// the winner. The loser reads back the winner's row.
///
/// `now` is caller-supplied; the window is evaluated against its projection
/// onto the server's local wall clock, and `now` itself is what gets
/// persisted.
pub async fn confirm_presence(
    db: &DatabaseConnection,
    req: &ConfirmRequest,
    now: DateTime<Utc>,
) -> Result<ConfirmationResult, DbErr> {
    let Some(session) =
        ClassSession::find_in_institution(db, req.institution_id, req.class_session_id).await?
    else {
        return Ok(ConfirmationResult::NotFound);
    };

    if let Some(existing) =
        AttendanceRecord::find_for(db, session.id, req.student_id).await?
    {
        return Ok(ConfirmationResult::AlreadyConfirmed {
            confirmed_at: existing.confirmed_at,
        });
    }

    let policy =
        EffectivePolicy::from_stored(Settings::for_institution(db, req.institution_id).await?);

    // The submitted proof has to match the institution's configured method.
    // Manual institutions accept no self-confirmation at all.
    let proof = match policy.method {
        ValidationMethod::Manual => {
            return Ok(ConfirmationResult::WrongValidationMethod {
                method: policy.method.to_string(),
            });
        }
        ValidationMethod::Geolocation => {
            if req.location.is_some() || req.location_error.is_some() {
                Proof::Location
            } else {
                return Ok(ConfirmationResult::WrongValidationMethod {
                    method: policy.method.to_string(),
                });
            }
        }
        ValidationMethod::Qrcode | ValidationMethod::Code => match req.code.as_deref() {
            Some(code) => Proof::Code(code),
            None => {
                return Ok(ConfirmationResult::WrongValidationMethod {
                    method: policy.method.to_string(),
                });
            }
        },
    };

    let Some(scheduled) = session.scheduled_window(db).await? else {
        return Ok(ConfirmationResult::ConfigurationError {
            reason: "class session has no scheduled time slot".into(),
        });
    };

    let now_local = now.with_timezone(&Local).naive_local();
    let outcome = match window::evaluate(&scheduled, policy.tolerance_minutes, now_local) {
        Ok(outcome) => outcome,
        Err(e) => {
            return Ok(ConfirmationResult::ConfigurationError {
                reason: e.to_string(),
            });
        }
    };
    match outcome {
        WindowOutcome::Valid => {}
        WindowOutcome::WrongDate => return Ok(ConfirmationResult::WrongDate),
        WindowOutcome::NotYetStarted { starts_at } => {
            return Ok(ConfirmationResult::NotYetStarted { starts_at });
        }
        WindowOutcome::Expired { expired_at } => {
            return Ok(ConfirmationResult::Expired { expired_at });
        }
    }

    let distance_m = match proof {
        Proof::Location => {
            if let Some(err) = req.location_error {
                return Ok(ConfirmationResult::LocationUnavailable {
                    reason: err.reason().to_string(),
                });
            }
            // The gate above guarantees location is present on this arm.
            let Some(point) = req.location else {
                return Ok(ConfirmationResult::LocationUnavailable {
                    reason: LocationError::Unavailable.reason().to_string(),
                });
            };
            let Some(center) = policy.center else {
                return Ok(ConfirmationResult::ConfigurationError {
                    reason: "institution coordinates are not configured".into(),
                });
            };
            match Geofence::new(center, policy.radius_m).locate(point) {
                GeofenceOutcome::InRange { distance_m } => Some(distance_m),
                GeofenceOutcome::OutOfRange { distance_m } => {
                    return Ok(ConfirmationResult::OutOfRange {
                        distance_m,
                        allowed_radius_m: policy.radius_m,
                    });
                }
            }
        }
        Proof::Code(submitted) => {
            if !presence::code::verify(&session.code_secret, submitted, now) {
                return Ok(ConfirmationResult::InvalidCode);
            }
            None
        }
    };

    let (latitude, longitude) = match req.location {
        Some(point) if distance_m.is_some() => (Some(point.latitude), Some(point.longitude)),
        _ => (None, None),
    };

    match AttendanceRecord::confirm_present(
        db,
        session.id,
        req.student_id,
        now,
        latitude,
        longitude,
        distance_m,
    )
    .await?
    {
        ConfirmInsert::Inserted(_) => Ok(ConfirmationResult::Confirmed { distance_m }),
        ConfirmInsert::AlreadyExists(winner) => Ok(ConfirmationResult::AlreadyConfirmed {
            confirmed_at: winner.confirmed_at,
        }),
    }
}

enum Proof<'a> {
    Location,
    Code(&'a str),
}
