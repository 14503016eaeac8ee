use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::institutions::classes::attendance::common::{RollCallBody, RollCallResponse};
use db::models::{attendance_record::Model as AttendanceRecord, class_session::Model as ClassSession};

/// PUT /institutions/{institution_id}/classes/{class_id}/attendance
///
/// Teacher roll call: writes or overwrites one record per listed student.
/// Staff only. This is the manual path, and it also lets staff correct
/// whatever a student's self-confirmation produced.
///
/// ### Request Body
/// ```json
/// {
///   "records": [
///     { "student_id": 9, "status": "present" },
///     { "student_id": 11, "status": "excused", "notes": "atestado médico" }
///   ]
/// }
/// ```
///
/// ### Responses
///
/// - `200 OK` with `{ "written": n }`
/// - `404 Not Found`
/// - `422 Unprocessable Entity` (empty record list)
pub async fn record_roll_call(
    State(app_state): State<AppState>,
    Path((institution_id, class_id)): Path<(i64, i64)>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(body): Json<RollCallBody>,
) -> (StatusCode, Json<ApiResponse<RollCallResponse>>) {
    let db = app_state.db();

    if body.records.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::error(
                "Request must include a non-empty list of records",
            )),
        );
    }

    match ClassSession::find_in_institution(db, institution_id, class_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Class session not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {}", e))),
            );
        }
    }

    let now = Utc::now();
    let mut written = 0usize;

    for entry in &body.records {
        match AttendanceRecord::upsert_status(
            db,
            class_id,
            entry.student_id,
            entry.status,
            entry.notes.as_deref(),
            claims.sub,
            now,
        )
        .await
        {
            Ok(_) => written += 1,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    class_id,
                    student_id = entry.student_id,
                    "roll call write failed"
                );
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::error(format!(
                        "Failed after writing {} of {} records",
                        written,
                        body.records.len()
                    ))),
                );
            }
        }
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            RollCallResponse { written },
            "Roll call recorded",
        )),
    )
}
