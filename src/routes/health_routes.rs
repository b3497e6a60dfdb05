//! Health check endpoints.

use crate::state::AppState;
use axum::{Router, routing::get};

/// Registers health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

async fn health_check() -> &'static str {
    "OK"
}
