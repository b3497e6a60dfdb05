use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{AccessorError, SessionAccessor};
use crate::models::Identity;

fn default_name() -> String {
    "static".to_string()
}

/// StaticAccessorConfig pins the answer of the accessor, for offline setups.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct StaticAccessorConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// The identity to report; absent means "signed out".
    #[serde(default)]
    pub user: Option<Identity>,
}

/// An accessor that always reports the configured identity.
pub struct StaticAccessor {
    pub config: StaticAccessorConfig,
}

impl StaticAccessor {
    pub fn new(config: &StaticAccessorConfig) -> Self {
        info!(
            "Creating static accessor '{}' (signed in: {})",
            config.name,
            config.user.is_some()
        );
        Self {
            config: config.clone(),
        }
    }
}

#[async_trait]
impl SessionAccessor for StaticAccessor {
    fn get_name(&self) -> &str {
        &self.config.name
    }

    async fn current_identity(&self) -> Result<Option<Identity>, AccessorError> {
        Ok(self.config.user.clone())
    }
}
