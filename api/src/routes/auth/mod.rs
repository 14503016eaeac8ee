//! # auth Routes Module
//!
//! Defines and wires up routes for the `/auth` endpoint group.
//!
//! ## Structure
//! - `post.rs` — POST handlers (login)
//! - `get.rs` — GET handlers (current user info)
//! - `common.rs` — shared response DTOs

pub mod common;
pub mod get;
pub mod post;

use axum::{
    Router,
    routing::{get, post},
};
use util::state::AppState;

use get::get_me;
use post::login;

/// Builds the `/auth` route group.
///
/// - `POST /auth/login` → `login`
/// - `GET /auth/me` → `get_me`
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/me", get(get_me))
}
