use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::identity::Identity;

fn default_token_type() -> String {
    "bearer".to_string()
}

/// A provider session as delivered with auth-state change events.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct Session {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Unix timestamp (seconds).
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub refresh_token: String,
    pub user: Identity,
}
