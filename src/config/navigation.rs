use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::navigation::AccessorFailurePolicy;
use crate::navigation::navigator::DEFAULT_MAX_REDIRECTS;

fn default_app_name() -> String {
    "Active Tracker".to_string()
}

fn default_max_redirects() -> usize {
    DEFAULT_MAX_REDIRECTS
}

/// Settings for the guard pipeline.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct NavigationConfig {
    /// Suffix of every document title: `"<route title> | <app_name>"`.
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default)]
    pub on_accessor_error: AccessorFailurePolicy,
    /// No limit unless set; the provider's own timeout applies.
    #[serde(default)]
    pub accessor_timeout_in_ms: Option<u64>,
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        NavigationConfig {
            app_name: default_app_name(),
            on_accessor_error: AccessorFailurePolicy::default(),
            accessor_timeout_in_ms: None,
            max_redirects: default_max_redirects(),
        }
    }
}
