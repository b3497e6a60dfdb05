//! Application startup and server initialization.
//!
//! Builds the shared state (route table, session store, accessor) and serves
//! the HTTP routes on the configured address.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ConfigV1;
use crate::routes;
use crate::state::AppState;

/// Initializes and runs the application server.
///
/// # Errors
///
/// Returns an error if the route table is misconfigured, if the server fails
/// to bind to the configured address, or if serving fails.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(config.clone())?;

    info!(
        "Starting server on {} with accessor '{}'",
        config.bind_address,
        state.accessor.get_name()
    );

    let app = routes::create_router(state);
    let listener = TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
