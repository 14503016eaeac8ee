//! # Settings Routes Module
//!
//! Attendance policy for one institution, mounted under
//! `/institutions/{institution_id}/settings`.
//!
//! ## Structure
//! - `get.rs` — GET handlers (effective policy, with defaults)
//! - `put.rs` — PUT handlers (upsert policy)
//! - `common.rs` — shared response DTOs

pub mod common;
pub mod get;
pub mod put;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, put},
};
use util::state::AppState;

use crate::auth::guards::{allow_institution_member, allow_institution_staff};
use get::get_settings;
use put::update_settings;

/// Builds the `/settings` route group.
///
/// - `GET /` → effective attendance policy (members)
/// - `PUT /` → create or replace the policy (staff)
pub fn settings_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_settings).route_layer(from_fn_with_state(
                app_state.clone(),
                allow_institution_member,
            )),
        )
        .route(
            "/",
            put(update_settings).route_layer(from_fn_with_state(
                app_state.clone(),
                allow_institution_staff,
            )),
        )
}
