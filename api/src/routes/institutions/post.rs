use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::format_validation_errors;
use db::models::institution;
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::institutions::common::InstitutionResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateInstitutionRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,
}

/// POST /institutions
///
/// Create a new institution. Admin only.
///
/// ### Request Body
/// ```json
/// { "name": "Colégio Horizonte" }
/// ```
///
/// ### Responses
///
/// - `201 Created` with the new institution
/// - `422 Unprocessable Entity` (validation failure)
/// - `500 Internal Server Error`
pub async fn create_institution(
    State(app_state): State<AppState>,
    Json(req): Json<CreateInstitutionRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::<InstitutionResponse>::error(error_message)),
        );
    }

    match institution::Model::create(app_state.db(), req.name.trim()).await {
        Ok(row) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                InstitutionResponse::from(row),
                "Institution created",
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
