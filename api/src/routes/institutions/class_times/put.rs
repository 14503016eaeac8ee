use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::class_time;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::Deserialize;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::institutions::class_times::common::{ClassTimeResponse, TIME_REGEX};

#[derive(Debug, Deserialize)]
pub struct EditClassTimeRequest {
    pub name: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub weekdays: Option<Vec<u8>>,
    pub active: Option<bool>,
}

/// PUT /institutions/{institution_id}/class-times/{class_time_id}
///
/// Edit a recurring time slot. Staff only. Only provided fields change,
/// and the merged start/end pair must still be a valid ordered window.
pub async fn edit_class_time(
    State(app_state): State<AppState>,
    Path((institution_id, class_time_id)): Path<(i64, i64)>,
    Json(body): Json<EditClassTimeRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    let Ok(existing) = class_time::Entity::find()
        .filter(class_time::Column::Id.eq(class_time_id))
        .filter(class_time::Column::InstitutionId.eq(institution_id))
        .one(db)
        .await
    else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<ClassTimeResponse>::error(
                "Database error retrieving class time",
            )),
        );
    };

    let Some(existing) = existing else {
        return (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<ClassTimeResponse>::error(
                "Class time not found",
            )),
        );
    };

    for time in [body.start_time.as_deref(), body.end_time.as_deref()]
        .into_iter()
        .flatten()
    {
        if !TIME_REGEX.is_match(time) {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::<ClassTimeResponse>::error(
                    "Times must be in HH:MM format",
                )),
            );
        }
    }

    let start = body.start_time.as_deref().unwrap_or(&existing.start_time);
    let end = body.end_time.as_deref().unwrap_or(&existing.end_time);
    if start >= end {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::<ClassTimeResponse>::error(
                "Start time must be before end time",
            )),
        );
    }

    if let Some(days) = body.weekdays.as_ref() {
        if days.is_empty() || days.iter().any(|d| *d > 6) {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::<ClassTimeResponse>::error(
                    "Weekdays must be between 0 (Sunday) and 6 (Saturday)",
                )),
            );
        }
    }

    let mut am: class_time::ActiveModel = existing.into();

    if let Some(name) = body.name {
        am.name = Set(name.trim().to_owned());
    }
    if let Some(start) = body.start_time {
        am.start_time = Set(start);
    }
    if let Some(end) = body.end_time {
        am.end_time = Set(end);
    }
    if let Some(days) = body.weekdays {
        am.weekdays = Set(serde_json::json!(days));
    }
    if let Some(active) = body.active {
        am.active = Set(active);
    }
    am.updated_at = Set(chrono::Utc::now());

    match am.update(db).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                ClassTimeResponse::from(updated),
                "Class time updated",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<ClassTimeResponse>::error(format!(
                "Failed to update class time: {}",
                e
            ))),
        ),
    }
}
