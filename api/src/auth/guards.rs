use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use axum::{
    Json,
    body::Body,
    extract::{FromRequestParts, Path, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use db::models::user;
use sea_orm::{DatabaseConnection, EntityTrait};
use std::collections::HashMap;
use util::state::AppState;

#[derive(serde::Serialize, Default)]
pub struct Empty;

/// Helper to extract, validate the user from request extensions and insert
/// them back into the request.
async fn extract_and_insert_authuser(
    req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), (StatusCode, Json<ApiResponse<Empty>>)> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Authentication required")),
            )
        })?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

/// Account row behind the token. Deleted or inactive accounts are denied
/// outright, even with a live token.
async fn load_account(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<user::Model, (StatusCode, Json<ApiResponse<Empty>>)> {
    let found = user::Entity::find_by_id(user_id).one(db).await;

    match found {
        Ok(Some(account)) if account.active => Ok(account),
        Ok(_) => Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Account is not active")),
        )),
        Err(e) => {
            // Deny on DB error (fail-safe)
            tracing::warn!(error = %e, user_id, "DB error while checking account; denying access");
            Err((
                StatusCode::FORBIDDEN,
                Json(ApiResponse::error("Access could not be verified")),
            ))
        }
    }
}

fn institution_id_from(
    params: &HashMap<String, String>,
) -> Result<i64, (StatusCode, Json<ApiResponse<Empty>>)> {
    params
        .get("institution_id")
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Missing or invalid institution_id")),
        ))
}

/// Basic guard to ensure the request is authenticated.
pub async fn allow_authenticated(
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, _user) = extract_and_insert_authuser(req).await?;

    Ok(next.run(req).await)
}

/// Admin-only guard.
pub async fn allow_admin(
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if !user.0.admin {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Admin access required")),
        ));
    }

    Ok(next.run(req).await)
}

/// Guard for routes scoped to one institution: admins pass, everyone else
/// must belong to the institution named in the path.
pub async fn allow_institution_member(
    State(app_state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if user.0.admin {
        return Ok(next.run(req).await);
    }

    let institution_id = institution_id_from(&params)?;
    let account = load_account(app_state.db(), user.0.sub).await?;

    if account.institution_id == Some(institution_id) {
        Ok(next.run(req).await)
    } else {
        Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Not a member of this institution")),
        ))
    }
}

/// Guard for institution management routes: admins pass, otherwise the user
/// must be a coordinator or teacher of the institution named in the path.
pub async fn allow_institution_staff(
    State(app_state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if user.0.admin {
        return Ok(next.run(req).await);
    }

    let institution_id = institution_id_from(&params)?;
    let account = load_account(app_state.db(), user.0.sub).await?;

    if account.institution_id == Some(institution_id) && account.role.is_staff() {
        Ok(next.run(req).await)
    } else {
        Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error(
                "Coordinator or teacher access required for this institution",
            )),
        ))
    }
}
