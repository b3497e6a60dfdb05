//! Session store endpoints, fed by the auth provider's state change events.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::models::Session;
use crate::session::AuthEvent;
use crate::state::AppState;

/// Registers session routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/session", get(current_session).post(auth_event))
}

#[derive(Deserialize)]
struct AuthEventPayload {
    event: AuthEvent,
    #[serde(default)]
    session: Option<Session>,
}

/// GET /session: the last-known identity, or null.
async fn current_session(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "user": state.session.identity() }))
}

/// POST /session: applies one auth-state change event.
async fn auth_event(
    State(state): State<AppState>,
    Json(payload): Json<AuthEventPayload>,
) -> StatusCode {
    state
        .session
        .apply_auth_event(payload.event, payload.session);
    StatusCode::NO_CONTENT
}
