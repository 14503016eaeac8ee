//! # Institutions Routes Module
//!
//! Defines and wires up routes for the `/institutions` endpoint group.
//!
//! ## Structure
//! - `post.rs` — POST handlers (create institution)
//! - `get.rs` — GET handlers (list institutions, fetch one)
//! - `common.rs` — shared response DTOs
//! - `settings/` — nested attendance policy routes
//! - `subjects/` — nested subject routes
//! - `class_times/` — nested recurring time slot routes
//! - `classes/` — nested class session and attendance routes
//!
//! ## Usage
//! Call `institutions_routes(app_state)` to get a configured `Router` for
//! `/institutions` to be mounted in the main app.

pub mod class_times;
pub mod classes;
pub mod common;
pub mod get;
pub mod post;
pub mod settings;
pub mod subjects;

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use util::state::AppState;

use crate::auth::guards::{allow_admin, allow_institution_member};
use class_times::class_times_routes;
use classes::classes_routes;
use get::{get_institution, list_institutions};
use post::create_institution;
use settings::settings_routes;
use subjects::subjects_routes;

/// Builds the `/institutions` route group.
///
/// Routes:
/// - `POST   /institutions`                    → create an institution (admin only)
/// - `GET    /institutions`                    → list institutions (admin only)
/// - `GET    /institutions/{institution_id}`   → fetch one (members of that institution)
///
/// Nested groups under `/institutions/{institution_id}`:
/// - `/settings`     → attendance policy (read: members, write: staff)
/// - `/subjects`     → subjects (read: members, write: staff)
/// - `/class-times`  → recurring time slots (read: members, write: staff)
/// - `/classes`      → class sessions and attendance (see `classes`)
pub fn institutions_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_institution).route_layer(from_fn(allow_admin)))
        .route("/", get(list_institutions).route_layer(from_fn(allow_admin)))
        .route(
            "/{institution_id}",
            get(get_institution).route_layer(from_fn_with_state(
                app_state.clone(),
                allow_institution_member,
            )),
        )
        .nest(
            "/{institution_id}/settings",
            settings_routes(app_state.clone()),
        )
        .nest(
            "/{institution_id}/subjects",
            subjects_routes(app_state.clone()),
        )
        .nest(
            "/{institution_id}/class-times",
            class_times_routes(app_state.clone()),
        )
        .nest(
            "/{institution_id}/classes",
            classes_routes(app_state.clone()),
        )
}
