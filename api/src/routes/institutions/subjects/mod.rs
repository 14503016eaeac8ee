//! # Subjects Routes Module
//!
//! Subjects taught at one institution, mounted under
//! `/institutions/{institution_id}/subjects`.

pub mod common;
pub mod get;
pub mod post;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use util::state::AppState;

use crate::auth::guards::{allow_institution_member, allow_institution_staff};
use get::list_subjects;
use post::create_subject;

/// Builds the `/subjects` route group.
///
/// - `POST /` → create a subject (staff)
/// - `GET /`  → list subjects (members)
pub fn subjects_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_subject).route_layer(from_fn_with_state(
                app_state.clone(),
                allow_institution_staff,
            )),
        )
        .route(
            "/",
            get(list_subjects).route_layer(from_fn_with_state(
                app_state.clone(),
                allow_institution_member,
            )),
        )
}
