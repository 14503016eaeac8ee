//! HTTP API for the attendance backend.
//!
//! Route handlers live under [`routes`], grouped by path segment; access
//! control lives in [`auth`]; the confirmation orchestrator that the routes
//! call into lives in [`services`].

pub mod auth;
pub mod response;
pub mod routes;
pub mod services;
