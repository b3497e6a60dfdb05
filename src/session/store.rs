use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use tracing::{debug, info};

use super::events::AuthEvent;
use crate::accessors::{AccessorError, SessionAccessor};
use crate::models::{Identity, Session};

/// Holds the last-known authenticated identity.
///
/// The cell starts empty and is only ever replaced wholesale. Auth-event
/// subscribers write it; guards and views read it.
#[derive(Debug, Default)]
pub struct SessionStore {
    cell: RwLock<Option<Identity>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stored identity. `None` clears it.
    pub fn set_identity(&self, candidate: Option<Identity>) {
        match &candidate {
            Some(identity) => debug!("Session identity set to '{}'", identity.label()),
            None => debug!("Session identity cleared"),
        }
        *self.cell.write().unwrap_or_else(PoisonError::into_inner) = candidate;
    }

    /// Stores the user carried by `session`, or clears the cell when there is none.
    pub fn set_from_session(&self, session: Option<&Session>) {
        self.set_identity(session.map(|s| s.user.clone()));
    }

    /// Subscriber entry point for provider auth-state changes.
    pub fn apply_auth_event(&self, event: AuthEvent, session: Option<Session>) {
        info!(
            event_name = "session.auth_event",
            auth_event = event.as_str(),
            has_session = session.is_some(),
            "applying auth-state change"
        );
        self.set_from_session(session.as_ref());
    }

    /// Returns the current identity, if any.
    pub fn identity(&self) -> Option<Identity> {
        self.cell
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.cell
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

/// The store doubles as an accessor that reports the last-known identity.
#[async_trait]
impl SessionAccessor for SessionStore {
    fn get_name(&self) -> &str {
        "session-store"
    }

    async fn current_identity(&self) -> Result<Option<Identity>, AccessorError> {
        Ok(self.identity())
    }
}
