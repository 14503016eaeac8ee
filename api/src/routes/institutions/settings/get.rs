use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::institution_settings;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::institutions::settings::common::SettingsResponse;

/// GET /institutions/{institution_id}/settings
///
/// Effective attendance policy for the institution. Institutions without a
/// saved policy get the built-in defaults (`configured: false`), which is
/// exactly what the confirmation flow applies for them.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "institution_id": 1,
///     "validation_method": "geolocation",
///     "tolerance_minutes": 15,
///     "latitude": -23.5505,
///     "longitude": -46.6333,
///     "radius_m": 100,
///     "configured": true
///   },
///   "message": "Settings retrieved"
/// }
/// ```
pub async fn get_settings(
    State(app_state): State<AppState>,
    Path(institution_id): Path<i64>,
) -> impl IntoResponse {
    match institution_settings::Model::for_institution(app_state.db(), institution_id).await {
        Ok(Some(row)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                SettingsResponse::from(row),
                "Settings retrieved",
            )),
        ),
        Ok(None) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                SettingsResponse::defaults(institution_id),
                "Settings retrieved",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<SettingsResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}
