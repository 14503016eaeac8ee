use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::institution;
use sea_orm::{EntityTrait, QueryOrder};
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::institutions::common::InstitutionResponse;

/// GET /institutions
///
/// List all institutions, newest first. Admin only.
pub async fn list_institutions(State(app_state): State<AppState>) -> impl IntoResponse {
    match institution::Entity::find()
        .order_by_desc(institution::Column::CreatedAt)
        .all(app_state.db())
        .await
    {
        Ok(rows) => {
            let institutions: Vec<InstitutionResponse> =
                rows.into_iter().map(InstitutionResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(institutions, "Institutions retrieved")),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Vec<InstitutionResponse>>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

/// GET /institutions/{institution_id}
///
/// Fetch a single institution. Members of that institution only, or admins.
pub async fn get_institution(
    State(app_state): State<AppState>,
    Path(institution_id): Path<i64>,
) -> impl IntoResponse {
    match institution::Entity::find_by_id(institution_id)
        .one(app_state.db())
        .await
    {
        Ok(Some(row)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                InstitutionResponse::from(row),
                "Institution retrieved",
            )),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<InstitutionResponse>::error(
                "Institution not found",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<InstitutionResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}
