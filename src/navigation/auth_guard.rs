use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::guard::{Guard, GuardDecision, NavigationTicket};
use super::navigator::NavigationError;
use super::route::ResolvedRoute;
use crate::accessors::{AccessorError, SessionAccessor};

/// What to do with a protected navigation when the identity lookup fails.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccessorFailurePolicy {
    /// Treat the failure like "nobody signed in" and redirect to login.
    #[default]
    Deny,
    /// Let the navigation through.
    Allow,
    /// Fail the navigation with the accessor error.
    Abort,
}

/// Stage 2: protected routes need a signed-in identity, otherwise the
/// navigation is redirected to the login route.
pub struct AuthGuard {
    accessor: Arc<dyn SessionAccessor>,
    login_route: String,
    on_error: AccessorFailurePolicy,
    timeout: Option<Duration>,
}

impl AuthGuard {
    pub fn new(accessor: Arc<dyn SessionAccessor>, login_route: &str) -> Self {
        Self {
            accessor,
            login_route: login_route.to_string(),
            on_error: AccessorFailurePolicy::default(),
            timeout: None,
        }
    }

    pub fn with_failure_policy(mut self, policy: AccessorFailurePolicy) -> Self {
        self.on_error = policy;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn lookup(&self) -> Result<bool, AccessorError> {
        let identity = match self.timeout {
            Some(limit) => timeout(limit, self.accessor.current_identity())
                .await
                .map_err(|_| AccessorError::Timeout {
                    name: self.accessor.get_name().to_string(),
                    timeout_in_ms: limit.as_millis() as u64,
                })??,
            None => self.accessor.current_identity().await?,
        };
        if let Some(identity) = &identity {
            debug!("Accessor reports signed-in user '{}'", identity.label());
        }
        Ok(identity.is_some())
    }
}

#[async_trait]
impl Guard for AuthGuard {
    fn get_name(&self) -> &str {
        "auth"
    }

    async fn check(
        &self,
        to: &ResolvedRoute,
        _ticket: NavigationTicket,
    ) -> Result<GuardDecision, NavigationError> {
        if !to.requires_auth() {
            return Ok(GuardDecision::Proceed);
        }

        match self.lookup().await {
            Ok(true) => Ok(GuardDecision::Proceed),
            Ok(false) => {
                info!(
                    "Route '{}' requires login; redirecting to '{}'",
                    to.name, self.login_route
                );
                Ok(GuardDecision::Redirect(self.login_route.clone()))
            }
            Err(e) => {
                warn!(
                    accessor = self.accessor.get_name(),
                    route = to.name.as_str(),
                    policy = ?self.on_error,
                    "identity lookup failed: {}",
                    e
                );
                match self.on_error {
                    AccessorFailurePolicy::Deny => {
                        Ok(GuardDecision::Redirect(self.login_route.clone()))
                    }
                    AccessorFailurePolicy::Allow => Ok(GuardDecision::Proceed),
                    AccessorFailurePolicy::Abort => Err(NavigationError::AccessorFailed(e)),
                }
            }
        }
    }
}
