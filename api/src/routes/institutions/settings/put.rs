use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::format_validation_errors;
use db::models::institution_settings::{self, ValidationMethod};
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::institutions::settings::common::SettingsResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSettingsRequest {
    pub validation_method: ValidationMethod,

    #[validate(range(min = 0, max = 60, message = "Tolerance must be between 0 and 60 minutes"))]
    pub tolerance_minutes: i32,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,

    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub longitude: Option<f64>,

    #[validate(range(min = 10, max = 1000, message = "Radius must be between 10 and 1000 metres"))]
    pub radius_m: i32,
}

/// PUT /institutions/{institution_id}/settings
///
/// Create or replace the institution's attendance policy. Staff only.
///
/// ### Request Body
/// ```json
/// {
///   "validation_method": "geolocation",
///   "tolerance_minutes": 15,
///   "latitude": -23.5505,
///   "longitude": -46.6333,
///   "radius_m": 100
/// }
/// ```
///
/// Latitude and longitude pin the campus for the geofence. They must be
/// provided together or omitted together.
///
/// ### Responses
///
/// - `200 OK` with the saved policy
/// - `422 Unprocessable Entity` (validation failure)
/// - `500 Internal Server Error`
pub async fn update_settings(
    State(app_state): State<AppState>,
    Path(institution_id): Path<i64>,
    Json(req): Json<UpdateSettingsRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::<SettingsResponse>::error(error_message)),
        );
    }

    if req.latitude.is_some() != req.longitude.is_some() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::<SettingsResponse>::error(
                "Latitude and longitude must be provided together",
            )),
        );
    }

    match institution_settings::Model::upsert(
        app_state.db(),
        institution_id,
        req.validation_method,
        req.tolerance_minutes,
        req.latitude,
        req.longitude,
        req.radius_m,
    )
    .await
    {
        Ok(row) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                SettingsResponse::from(row),
                "Settings updated",
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
