use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::class_time;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::institutions::class_times::common::ClassTimeResponse;

/// GET /institutions/{institution_id}/class-times
///
/// List the institution's time slots, earliest start first.
pub async fn list_class_times(
    State(app_state): State<AppState>,
    Path(institution_id): Path<i64>,
) -> impl IntoResponse {
    match class_time::Model::list_for_institution(app_state.db(), institution_id).await {
        Ok(rows) => {
            let slots: Vec<ClassTimeResponse> =
                rows.into_iter().map(ClassTimeResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(slots, "Class times retrieved")),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Vec<ClassTimeResponse>>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}
