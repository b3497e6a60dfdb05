//! Navigation endpoint: runs a location through the guard pipeline.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::navigation::DocumentTitle;
use crate::state::AppState;
use crate::utils::http_helpers::{AccessToken, HTTPError};

/// Registers navigation routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/navigate", get(navigate))
}

#[derive(Deserialize)]
struct NavigateParams {
    to: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct NavigateResponse {
    pub name: String,
    pub path: String,
    pub params: BTreeMap<String, String>,
    pub query: Option<String>,
    pub title: String,
    pub redirected_from: Option<String>,
}

/// Resolves `?to=<location>` for the caller identified by the bearer token.
async fn navigate(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    Query(params): Query<NavigateParams>,
) -> Result<Json<NavigateResponse>, HTTPError> {
    let document = Arc::new(DocumentTitle::new());
    let navigator = state.navigator(token, document.clone());

    let navigation = navigator.navigate(&params.to).await?;
    info!(
        "Navigation to '{}' resolved to route '{}'",
        params.to, navigation.route.name
    );

    let route = navigation.route;
    Ok(Json(NavigateResponse {
        name: route.name,
        path: route.path,
        params: route.params,
        query: route.query,
        title: document.get(),
        redirected_from: navigation.redirected_from,
    }))
}
