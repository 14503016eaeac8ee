//! # Classes Routes Module
//!
//! Dated class sessions and their attendance, mounted under
//! `/institutions/{institution_id}/classes`.
//!
//! ## Structure
//! - `post.rs` — POST handlers (schedule a session)
//! - `get.rs` — GET handlers (list sessions, fetch one)
//! - `common.rs` — shared DTOs and pagination types
//! - `attendance/` — nested confirmation, roll call, report and export routes

pub mod attendance;
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
use attendance::attendance_routes;
use get::{get_class, list_classes};
use post::create_class;

/// Builds the `/classes` route group.
///
/// - `POST /`             → schedule a session (staff)
/// - `GET  /`             → list sessions, filterable and paginated (members)
/// - `GET  /{class_id}`   → fetch one session (members)
///
/// Nested under `/{class_id}/attendance`: confirmation, rotating code,
/// roll call, report and CSV export (see `attendance`).
pub fn classes_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_class).route_layer(from_fn_with_state(
                app_state.clone(),
                allow_institution_staff,
            )),
        )
        .route(
            "/",
            get(list_classes).route_layer(from_fn_with_state(
                app_state.clone(),
                allow_institution_member,
            )),
        )
        .route(
            "/{class_id}",
            get(get_class).route_layer(from_fn_with_state(
                app_state.clone(),
                allow_institution_member,
            )),
        )
        .nest(
            "/{class_id}/attendance",
            attendance_routes(app_state.clone()).route_layer(from_fn_with_state(
                app_state.clone(),
                allow_institution_member,
            )),
        )
}
