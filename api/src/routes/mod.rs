//! HTTP route entry point for `/api/...`.
//!
//! Routes are organized by domain, each protected by the access-control
//! middleware it needs:
//! - `/health` → liveness check (public)
//! - `/auth` → login and current-user endpoints (login public)
//! - `/institutions` → institution management, attendance policy, subjects,
//!   class times, class sessions, and the attendance confirmation engine
//!   (authenticated; per-route role guards inside)

use crate::auth::guards::allow_authenticated;
use crate::routes::{auth::auth_routes, health::health_routes, institutions::institutions_routes};
use axum::{Router, middleware::from_fn};
use util::state::AppState;

pub mod auth;
pub mod health;
pub mod institutions;

/// Builds the complete application router for all HTTP endpoints.
///
/// The returned router carries no leftover state; `AppState` is supplied
/// here, once, so `main` and the test harness build the app the same way.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest(
            "/institutions",
            institutions_routes(app_state.clone()).route_layer(from_fn(allow_authenticated)),
        )
        .with_state(app_state)
}
