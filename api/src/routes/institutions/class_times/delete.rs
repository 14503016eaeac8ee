use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::class_time;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use util::state::AppState;

use crate::response::ApiResponse;

/// DELETE /institutions/{institution_id}/class-times/{class_time_id}
///
/// Delete a time slot. Staff only. Sessions scheduled against the slot are
/// removed with it, along with their attendance records.
pub async fn delete_class_time(
    State(app_state): State<AppState>,
    Path((institution_id, class_time_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    let res = class_time::Entity::delete_many()
        .filter(class_time::Column::Id.eq(class_time_id))
        .filter(class_time::Column::InstitutionId.eq(institution_id))
        .exec(app_state.db())
        .await;

    match res {
        Ok(dr) if dr.rows_affected > 0 => (
            StatusCode::OK,
            Json(ApiResponse::<()>::success((), "Class time deleted")),
        ),
        Ok(_) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error("Class time not found")),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error("Failed to delete class time")),
        ),
    }
}
