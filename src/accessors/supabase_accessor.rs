use async_trait::async_trait;
use reqwest::StatusCode;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{AccessorError, SessionAccessor};
use crate::models::Identity;

fn default_name() -> String {
    "supabase".to_string()
}

/// The config needed to ask Supabase Auth for the current user.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct SupabaseAccessorConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Project URL, e.g. `https://xyzcompany.supabase.co`.
    pub url: String,
    /// Public anon key, sent as the `apikey` header.
    pub anon_key: String,
}

/// An accessor that calls the Supabase `GET /auth/v1/user` endpoint with the
/// bound access token.
#[derive(Clone)]
pub struct SupabaseAccessor {
    pub config: SupabaseAccessorConfig,
    client: reqwest::Client,
    access_token: Option<String>,
}

impl SupabaseAccessor {
    pub fn new(config: &SupabaseAccessorConfig) -> Self {
        info!(
            "Creating Supabase accessor '{}' for '{}'",
            config.name, config.url
        );
        Self {
            config: config.clone(),
            client: reqwest::Client::new(),
            access_token: None,
        }
    }

    /// Binds the session access token used for the lookup. Without one the
    /// accessor reports nobody signed in.
    pub fn with_access_token(mut self, access_token: Option<String>) -> Self {
        self.access_token = access_token;
        self
    }
}

#[async_trait]
impl SessionAccessor for SupabaseAccessor {
    fn get_name(&self) -> &str {
        &self.config.name
    }

    async fn current_identity(&self) -> Result<Option<Identity>, AccessorError> {
        let Some(token) = self.access_token.as_deref() else {
            debug!("No access token bound; treating as signed out");
            return Ok(None);
        };
        query(&self.client, &self.config.url, &self.config.anon_key, token).await
    }
}

/// Queries the Supabase user endpoint. 401/403 mean the session is missing or
/// expired and map to `Ok(None)`.
async fn query(
    client: &reqwest::Client,
    url: &str,
    anon_key: &str,
    token: &str,
) -> Result<Option<Identity>, AccessorError> {
    let url = format!("{}/auth/v1/user", url.trim_end_matches('/'));

    debug!("Sending Supabase user request to: {}", url);
    let response = client
        .get(&url)
        .header("apikey", anon_key)
        .bearer_auth(token)
        .send()
        .await?;

    match response.status() {
        status if status.is_success() => {
            let body = response.text().await?;
            let identity: Identity =
                serde_json::from_str(&body).map_err(|e| AccessorError::Decode(e.to_string()))?;
            debug!("Supabase reports user '{}'", identity.label());
            Ok(Some(identity))
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            debug!("Supabase rejected the access token; no current user");
            Ok(None)
        }
        status => Err(AccessorError::Status(status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    const USER_BODY: &str = r#"{
        "id": "0b6f8a52-34c5-4a3c-9ad4-3f4ad1c0b1d2",
        "aud": "authenticated",
        "role": "authenticated",
        "email": "runner@example.com"
    }"#;

    fn accessor_for(url: String, token: Option<&str>) -> SupabaseAccessor {
        SupabaseAccessor::new(&SupabaseAccessorConfig {
            name: "test".to_string(),
            url,
            anon_key: "anon".to_string(),
        })
        .with_access_token(token.map(str::to_string))
    }

    /// A valid token returns the user, and both headers are sent.
    #[tokio::test]
    async fn test_supabase_accessor_success() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/auth/v1/user")
            .match_header("apikey", "anon")
            .match_header("authorization", "Bearer good_token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(USER_BODY)
            .create_async()
            .await;

        let accessor = accessor_for(server.url(), Some("good_token"));
        let identity = accessor
            .current_identity()
            .await
            .expect("lookup should succeed")
            .expect("user should be present");
        m.assert_async().await;
        assert_eq!(identity.email.as_deref(), Some("runner@example.com"));
    }

    /// An expired or invalid session is "nobody signed in", not a failure.
    #[tokio::test]
    async fn test_supabase_accessor_rejected_token() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/auth/v1/user")
            .with_status(401)
            .with_body(r#"{"msg": "invalid JWT"}"#)
            .create_async()
            .await;

        let accessor = accessor_for(server.url(), Some("expired"));
        let result = accessor.current_identity().await;
        m.assert_async().await;
        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_supabase_accessor_server_error() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/auth/v1/user")
            .with_status(503)
            .create_async()
            .await;

        let accessor = accessor_for(server.url(), Some("token"));
        let result = accessor.current_identity().await;
        m.assert_async().await;
        assert!(matches!(
            result,
            Err(AccessorError::Status(StatusCode::SERVICE_UNAVAILABLE))
        ));
    }

    #[tokio::test]
    async fn test_supabase_accessor_bad_body() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/auth/v1/user")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let accessor = accessor_for(format!("{}/", server.url()), Some("token"));
        let result = accessor.current_identity().await;
        m.assert_async().await;
        assert!(matches!(result, Err(AccessorError::Decode(_))));
    }

    /// Without a token no request is made at all.
    #[tokio::test]
    async fn test_supabase_accessor_without_token() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/auth/v1/user")
            .expect(0)
            .create_async()
            .await;

        let accessor = accessor_for(server.url(), None);
        assert!(matches!(accessor.current_identity().await, Ok(None)));
        m.assert_async().await;
    }
}
