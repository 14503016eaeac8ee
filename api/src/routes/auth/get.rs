use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::user;
use sea_orm::EntityTrait;
use util::state::AppState;

use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::auth::common::UserResponse;

/// GET /auth/me
///
/// Returns the authenticated user's profile. Requires a valid bearer token
/// in the `Authorization` header.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": 42,
///     "email": "teacher@example.edu",
///     "name": "Marcos Lima",
///     "role": "teacher",
///     "institution_id": 1,
///     "active": true
///   },
///   "message": "User data retrieved successfully"
/// }
/// ```
///
/// - `401 Unauthorized` (missing or invalid token)
/// - `404 Not Found` (token subject no longer exists)
pub async fn get_me(State(app_state): State<AppState>, AuthUser(claims): AuthUser) -> impl IntoResponse {
    match user::Entity::find_by_id(claims.sub).one(app_state.db()).await {
        Ok(Some(user)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                UserResponse::from(user),
                "User data retrieved successfully",
            )),
        ),

        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<UserResponse>::error("User not found")),
        ),

        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<UserResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}
