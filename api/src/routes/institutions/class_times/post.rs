use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::format_validation_errors;
use db::models::class_time;
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::institutions::class_times::common::{ClassTimeResponse, TIME_REGEX};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClassTimeRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(regex(
        path = &*TIME_REGEX,
        message = "Start time must be in HH:MM format"
    ))]
    pub start_time: String,

    #[validate(regex(
        path = &*TIME_REGEX,
        message = "End time must be in HH:MM format"
    ))]
    pub end_time: String,

    #[validate(length(min = 1, message = "At least one weekday is required"))]
    pub weekdays: Vec<u8>,

    pub active: Option<bool>,
}

/// POST /institutions/{institution_id}/class-times
///
/// Create a recurring time slot. Staff only.
///
/// ### Request Body
/// ```json
/// {
///   "name": "Manhã 1",
///   "start_time": "08:00",
///   "end_time": "09:40",
///   "weekdays": [1, 3, 5],
///   "active": true
/// }
/// ```
///
/// Weekday numbers run 0 (Sunday) through 6 (Saturday). The start must come
/// before the end; overnight slots are not supported.
///
/// ### Responses
///
/// - `201 Created` with the new slot
/// - `422 Unprocessable Entity` (validation failure)
/// - `500 Internal Server Error`
pub async fn create_class_time(
    State(app_state): State<AppState>,
    Path(institution_id): Path<i64>,
    Json(req): Json<CreateClassTimeRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::<ClassTimeResponse>::error(error_message)),
        );
    }

    // Zero-padded 24h strings order the same way the clock does.
    if req.start_time >= req.end_time {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::<ClassTimeResponse>::error(
                "Start time must be before end time",
            )),
        );
    }

    if req.weekdays.iter().any(|d| *d > 6) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::<ClassTimeResponse>::error(
                "Weekdays must be between 0 (Sunday) and 6 (Saturday)",
            )),
        );
    }

    match class_time::Model::create(
        app_state.db(),
        institution_id,
        req.name.trim(),
        &req.start_time,
        &req.end_time,
        &req.weekdays,
        req.active.unwrap_or(true),
    )
    .await
    {
        Ok(row) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                ClassTimeResponse::from(row),
                "Class time created",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<ClassTimeResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}
