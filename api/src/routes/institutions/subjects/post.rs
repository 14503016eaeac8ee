use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::format_validation_errors;
use db::models::subject;
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::institutions::subjects::common::SubjectResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSubjectRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,
}

/// POST /institutions/{institution_id}/subjects
///
/// Create a subject. Staff only.
pub async fn create_subject(
    State(app_state): State<AppState>,
    Path(institution_id): Path<i64>,
    Json(req): Json<CreateSubjectRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::<SubjectResponse>::error(error_message)),
        );
    }

    match subject::Model::create(app_state.db(), institution_id, req.name.trim()).await {
        Ok(row) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                SubjectResponse::from(row),
                "Subject created",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<SubjectResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}
