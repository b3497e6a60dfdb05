use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// The Identity struct represents the user record returned by the auth provider.
///
/// Only `id` is required; everything else mirrors what Supabase returns from
/// `/auth/v1/user` and is carried through untouched.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct Identity {
    pub id: Uuid,
    #[serde(default)]
    pub aud: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub app_metadata: Map<String, Value>,
    #[serde(default)]
    pub user_metadata: Map<String, Value>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Identity {
    /// Construct a bare identity with only an id and an optional email.
    pub fn new(id: Uuid, email: Option<String>) -> Self {
        Identity {
            id,
            aud: "authenticated".to_string(),
            role: Some("authenticated".to_string()),
            email,
            phone: None,
            app_metadata: Map::new(),
            user_metadata: Map::new(),
            created_at: None,
        }
    }

    /// Best-effort display label for logs.
    pub fn label(&self) -> String {
        self.email.clone().unwrap_or_else(|| self.id.to_string())
    }
}
