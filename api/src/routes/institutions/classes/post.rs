use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use db::models::{class_session, class_time, subject};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::Deserialize;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::institutions::classes::common::ClassSessionResponse;

#[derive(Debug, Deserialize)]
pub struct CreateClassRequest {
    pub subject_id: i64,
    pub teacher_id: i64,
    pub class_time_id: i64,
    pub session_date: NaiveDate,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// POST /institutions/{institution_id}/classes
///
/// Schedule a class session. Staff only. The subject and time slot must
/// belong to the institution in the path.
///
/// ### Request Body
/// ```json
/// {
///   "subject_id": 3,
///   "teacher_id": 7,
///   "class_time_id": 2,
///   "session_date": "2026-03-06",
///   "title": "Revisão de frações"
/// }
/// ```
///
/// ### Responses
///
/// - `201 Created` with the new session
/// - `422 Unprocessable Entity` (subject or slot outside this institution)
/// - `500 Internal Server Error`
pub async fn create_class(
    State(app_state): State<AppState>,
    Path(institution_id): Path<i64>,
    Json(req): Json<CreateClassRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    let subject_ok = subject::Entity::find()
        .filter(subject::Column::Id.eq(req.subject_id))
        .filter(subject::Column::InstitutionId.eq(institution_id))
        .one(db)
        .await;
    match subject_ok {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::<ClassSessionResponse>::error(
                    "Subject does not belong to this institution",
                )),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ClassSessionResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    }

    let slot_ok = class_time::Entity::find()
        .filter(class_time::Column::Id.eq(req.class_time_id))
        .filter(class_time::Column::InstitutionId.eq(institution_id))
        .one(db)
        .await;
    match slot_ok {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::<ClassSessionResponse>::error(
                    "Class time does not belong to this institution",
                )),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ClassSessionResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    }

    match class_session::Model::create(
        db,
        institution_id,
        req.subject_id,
        req.teacher_id,
        req.class_time_id,
        req.session_date,
        req.title.as_deref(),
        req.description.as_deref(),
    )
    .await
    {
        Ok(row) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                ClassSessionResponse::from(row),
                "Class session created",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<ClassSessionResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}
