//! HTTP route definitions and handlers.
//!
//! This module organizes all HTTP endpoints into logical groups:
//! navigation, route listing, session events, and health checks.

mod health_routes;
mod navigation_routes;
mod route_list_routes;
mod session_routes;

use crate::state::AppState;
use axum::Router;

/// Creates the application router with all configured routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(navigation_routes::routes())
        .merge(route_list_routes::routes())
        .merge(session_routes::routes())
        .merge(health_routes::routes())
        .with_state(state)
}
