use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::format_validation_errors;
use db::models::user;
use serde::{Deserialize, Serialize};
use util::state::AppState;
use validator::Validate;

use crate::auth::generate_jwt;
use crate::response::ApiResponse;
use crate::routes::auth::common::UserResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
    pub user: UserResponse,
}

/// POST /auth/login
///
/// Authenticate an existing user and issue a JWT.
///
/// ### Request Body
/// ```json
/// {
///   "email": "user@example.com",
///   "password": "strongpassword"
/// }
/// ```
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "token": "jwt_token_here",
///     "expires_at": "2026-03-06T12:00:00Z",
///     "user": {
///       "id": 1,
///       "email": "user@example.com",
///       "name": "Ana Souza",
///       "role": "student",
///       "institution_id": 1,
///       "active": true
///     }
///   },
///   "message": "Login successful"
/// }
/// ```
///
/// - `401 Unauthorized` (invalid credentials or deactivated account)
/// ```json
/// {
///   "success": false,
///   "message": "Invalid email or password"
/// }
/// ```
///
/// - `422 Unprocessable Entity` (validation failure)
/// - `500 Internal Server Error`
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::<LoginResponse>::error(error_message)),
        );
    }

    match user::Model::verify_credentials(app_state.db(), &req.email, &req.password).await {
        Ok(Some(user)) => {
            let (token, expires_at) = generate_jwt(user.id, user.is_admin());
            let response = LoginResponse {
                token,
                expires_at,
                user: UserResponse::from(user),
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(response, "Login successful")),
            )
        }

        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<LoginResponse>::error(
                "Invalid email or password",
            )),
        ),

        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<LoginResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}
