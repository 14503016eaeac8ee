//! # Attendance Routes Module
//!
//! Everything attendance for one class session, mounted under
//! `/institutions/{institution_id}/classes/{class_id}/attendance`.
//!
//! ## Structure
//! - `post.rs` — POST handlers (student self-confirmation)
//! - `get.rs` — GET handlers (rotating code, report, CSV export)
//! - `put.rs` — PUT handlers (teacher roll call)
//! - `common.rs` — request/response DTOs

pub mod common;
pub mod get;
pub mod post;
pub mod put;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use util::state::AppState;

use crate::auth::guards::allow_institution_staff;
use get::{export_attendance_csv, get_attendance_code, get_attendance_report};
use post::confirm_attendance;
use put::record_roll_call;

/// Builds the `/attendance` route group.
///
/// - `POST /confirm` → student self-confirmation (members; students only,
///   checked in the handler)
/// - `GET  /code`    → current rotating code (staff)
/// - `GET  /`        → per-student report with summary (staff)
/// - `PUT  /`        → roll call upsert (staff)
/// - `GET  /export`  → CSV download (staff)
pub fn attendance_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/confirm", post(confirm_attendance))
        .route(
            "/code",
            get(get_attendance_code).route_layer(from_fn_with_state(
                app_state.clone(),
                allow_institution_staff,
            )),
        )
        .route(
            "/",
            get(get_attendance_report).route_layer(from_fn_with_state(
                app_state.clone(),
                allow_institution_staff,
            )),
        )
        .route(
            "/",
            put(record_roll_call).route_layer(from_fn_with_state(
                app_state.clone(),
                allow_institution_staff,
            )),
        )
        .route(
            "/export",
            get(export_attendance_csv).route_layer(from_fn_with_state(
                app_state.clone(),
                allow_institution_staff,
            )),
        )
}
