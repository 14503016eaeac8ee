use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use presence::{ConfirmationResult, Coordinates};
use sea_orm::EntityTrait;
use serde_json::Value;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::institutions::classes::attendance::common::ConfirmAttendanceBody;
use crate::services::attendance::{ConfirmRequest, confirm_presence};
use db::models::user;

/// POST /institutions/{institution_id}/classes/{class_id}/attendance/confirm
///
/// Student self-confirmation. The body carries whichever proof the
/// institution's validation method calls for:
///
/// ```json
/// { "location": { "latitude": -23.5505, "longitude": -46.6333 } }
/// ```
/// ```json
/// { "location_error": "denied" }
/// ```
/// ```json
/// { "code": "483920" }
/// ```
///
/// The response always carries the confirmation outcome as `data`, tagged
/// under `result`, so clients branch on it rather than on the message.
///
/// ### Status mapping
/// - `confirmed` → 200
/// - `already_confirmed` → 409
/// - `not_found` → 404
/// - `configuration_error` → 500
/// - every other denial → 403
pub async fn confirm_attendance(
    State(app_state): State<AppState>,
    Path((institution_id, class_id)): Path<(i64, i64)>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(body): Json<ConfirmAttendanceBody>,
) -> (StatusCode, Json<ApiResponse<Value>>) {
    let db = app_state.db();

    // Staff and admins have the roll call; self-confirmation is for students.
    let is_student = user::Entity::find_by_id(claims.sub)
        .one(db)
        .await
        .ok()
        .flatten()
        .map(|u| u.is_student())
        .unwrap_or(false);
    if !is_student {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error(
                "Only students are allowed to confirm attendance",
            )),
        );
    }

    if body.location.is_none() && body.location_error.is_none() && body.code.is_none() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::error(
                "Provide a location, a location error or an attendance code",
            )),
        );
    }

    let req = ConfirmRequest {
        institution_id,
        class_session_id: class_id,
        student_id: claims.sub,
        location: body
            .location
            .map(|l| Coordinates::new(l.latitude, l.longitude)),
        location_error: body.location_error,
        code: body.code,
    };

    let outcome = match confirm_presence(db, &req, Utc::now()).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %e, class_id, student_id = claims.sub, "confirmation failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to record attendance")),
            );
        }
    };

    let payload = serde_json::to_value(&outcome).unwrap_or_default();

    let (status, message) = match &outcome {
        ConfirmationResult::Confirmed { .. } => (StatusCode::OK, "Attendance confirmed"),
        ConfirmationResult::AlreadyConfirmed { .. } => (
            StatusCode::CONFLICT,
            "Attendance already confirmed for this session",
        ),
        ConfirmationResult::NotFound => (StatusCode::NOT_FOUND, "Class session not found"),
        ConfirmationResult::ConfigurationError { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Attendance is not configured correctly; contact your institution",
        ),
        ConfirmationResult::NotYetStarted { .. } => (
            StatusCode::FORBIDDEN,
            "The confirmation window has not opened yet",
        ),
        ConfirmationResult::Expired { .. } => {
            (StatusCode::FORBIDDEN, "The confirmation window has closed")
        }
        ConfirmationResult::WrongDate => (
            StatusCode::FORBIDDEN,
            "This class session is not scheduled for today",
        ),
        ConfirmationResult::WrongValidationMethod { .. } => (
            StatusCode::FORBIDDEN,
            "This institution validates attendance with a different method",
        ),
        ConfirmationResult::OutOfRange { .. } => (
            StatusCode::FORBIDDEN,
            "Your device is outside the allowed area",
        ),
        ConfirmationResult::LocationUnavailable { .. } => (
            StatusCode::FORBIDDEN,
            "Your device could not provide a location",
        ),
        ConfirmationResult::InvalidCode => (StatusCode::FORBIDDEN, "Invalid attendance code"),
    };

    let body = if outcome.is_confirmed() {
        ApiResponse::success(payload, message)
    } else {
        ApiResponse::error_with_data(payload, message)
    };

    (status, Json(body))
}
