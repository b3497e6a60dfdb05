use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{
    static_accessor::{StaticAccessor, StaticAccessorConfig},
    supabase_accessor::{SupabaseAccessor, SupabaseAccessorConfig},
};
use crate::models::Identity;
use crate::session::SessionStore;

/// Configuration options for the auth session accessor.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, Default)]
#[serde(tag = "type")]
pub enum AccessorConfig {
    #[serde(rename = "supabase")]
    Supabase(SupabaseAccessorConfig),
    #[serde(rename = "static")]
    Static(StaticAccessorConfig),
    /// Gate on whatever identity the session store last received.
    #[default]
    #[serde(rename = "session-store")]
    SessionStore,
}

/// Failures while looking up the current identity.
#[derive(Debug, thiserror::Error)]
pub enum AccessorError {
    #[error("error sending request: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status code: {0}")]
    Status(reqwest::StatusCode),
    #[error("error parsing identity: {0}")]
    Decode(String),
    #[error("accessor '{name}' timed out after {timeout_in_ms}ms")]
    Timeout { name: String, timeout_in_ms: u64 },
}

/// Answers "who is signed in right now?".
///
/// `Ok(None)` means nobody is; `Err` means the question could not be answered.
#[async_trait::async_trait]
pub trait SessionAccessor: Send + Sync {
    fn get_name(&self) -> &str;
    async fn current_identity(&self) -> Result<Option<Identity>, AccessorError>;
}

/// Create the configured accessor. The session store backs the `session-store` variant.
pub fn create_accessor(
    config: &AccessorConfig,
    session: Arc<SessionStore>,
) -> Arc<dyn SessionAccessor> {
    match config {
        AccessorConfig::Supabase(cfg) => Arc::new(SupabaseAccessor::new(cfg)),
        AccessorConfig::Static(cfg) => Arc::new(StaticAccessor::new(cfg)),
        AccessorConfig::SessionStore => {
            info!("Using the in-memory session store as auth session accessor");
            session
        }
    }
}
