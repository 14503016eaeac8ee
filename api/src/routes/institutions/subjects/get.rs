use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::subject;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::institutions::subjects::common::SubjectResponse;

/// GET /institutions/{institution_id}/subjects
///
/// List the institution's subjects, alphabetically.
pub async fn list_subjects(
    State(app_state): State<AppState>,
    Path(institution_id): Path<i64>,
) -> impl IntoResponse {
    match subject::Model::list_for_institution(app_state.db(), institution_id).await {
        Ok(rows) => {
            let subjects: Vec<SubjectResponse> =
                rows.into_iter().map(SubjectResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(subjects, "Subjects retrieved")),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Vec<SubjectResponse>>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}
