//! Route table listing.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::state::AppState;

/// Registers route listing routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/routes", get(list_routes))
}

/// GET /routes: every descriptor with its pattern, title, flag and view.
async fn list_routes(State(state): State<AppState>) -> Json<Value> {
    let routes: Vec<Value> = state
        .table
        .descriptors()
        .map(|d| {
            json!({
                "name": d.name,
                "path": d.pattern.to_string(),
                "title": d.title,
                "auth_required": d.auth_required,
                "view": d.view.component(),
                "lazy": d.view.is_lazy(),
            })
        })
        .collect();

    Json(json!({
        "login_route": state.table.login_route(),
        "routes": routes,
    }))
}
