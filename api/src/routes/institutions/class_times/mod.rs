//! # Class Times Routes Module
//!
//! Named recurring time slots ("Manhã 1", 08:00–09:40, Mon/Wed/Fri),
//! mounted under `/institutions/{institution_id}/class-times`.
//!
//! ## Structure
//! - `post.rs` — POST handlers (create slot)
//! - `get.rs` — GET handlers (list slots)
//! - `put.rs` — PUT handlers (edit slot)
//! - `delete.rs` — DELETE handlers (remove slot)
//! - `common.rs` — shared DTOs and the `HH:MM` validation regex

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
};
use util::state::AppState;

use crate::auth::guards::{allow_institution_member, allow_institution_staff};
use delete::delete_class_time;
use get::list_class_times;
use post::create_class_time;
use put::edit_class_time;

/// Builds the `/class-times` route group.
///
/// - `POST   /`                 → create a slot (staff)
/// - `GET    /`                 → list slots (members)
/// - `PUT    /{class_time_id}`  → edit a slot (staff)
/// - `DELETE /{class_time_id}`  → delete a slot (staff)
pub fn class_times_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_class_time).route_layer(from_fn_with_state(
                app_state.clone(),
                allow_institution_staff,
            )),
        )
        .route(
            "/",
            get(list_class_times).route_layer(from_fn_with_state(
                app_state.clone(),
                allow_institution_member,
            )),
        )
        .route(
            "/{class_time_id}",
            put(edit_class_time).route_layer(from_fn_with_state(
                app_state.clone(),
                allow_institution_staff,
            )),
        )
        .route(
            "/{class_time_id}",
            delete(delete_class_time).route_layer(from_fn_with_state(
                app_state.clone(),
                allow_institution_staff,
            )),
        )
}
