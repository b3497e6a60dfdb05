//! Shared application state.
//!
//! Contains the state that is shared across all request handlers:
//! configuration, the route table, the session store and the accessor.

use std::sync::Arc;

use crate::accessors::supabase_accessor::SupabaseAccessor;
use crate::accessors::{AccessorConfig, SessionAccessor, create_accessor};
use crate::config::ConfigV1;
use crate::navigation::{DocumentTitle, Navigator, RouteTable, RouteTableError};
use crate::session::SessionStore;

/// Application state shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Route table, validated once at startup.
    pub table: Arc<RouteTable>,
    /// Last-known identity, fed by auth-state change events.
    pub session: Arc<SessionStore>,
    /// Accessor used when the request carries no credentials of its own.
    pub accessor: Arc<dyn SessionAccessor>,
    supabase: Option<SupabaseAccessor>,
}

impl AppState {
    /// Builds the state, failing fast on a misconfigured route table.
    pub fn new(config: Arc<ConfigV1>) -> Result<Self, RouteTableError> {
        let table = Arc::new(RouteTable::new(&config.routes, &config.login_route)?);
        let session = Arc::new(SessionStore::new());

        let supabase = match &config.accessor {
            AccessorConfig::Supabase(cfg) => Some(SupabaseAccessor::new(cfg)),
            _ => None,
        };
        let accessor = match &supabase {
            Some(supabase) => Arc::new(supabase.clone()) as Arc<dyn SessionAccessor>,
            None => create_accessor(&config.accessor, session.clone()),
        };

        Ok(AppState {
            config,
            table,
            session,
            accessor,
            supabase,
        })
    }

    /// The accessor for one request. Supabase lookups use the caller's token;
    /// other accessors ignore it.
    pub fn accessor_for(&self, access_token: Option<String>) -> Arc<dyn SessionAccessor> {
        match &self.supabase {
            Some(supabase) => Arc::new(supabase.clone().with_access_token(access_token)),
            None => self.accessor.clone(),
        }
    }

    /// A fresh two-stage navigator writing into `document`.
    pub fn navigator(&self, access_token: Option<String>, document: Arc<DocumentTitle>) -> Navigator {
        Navigator::standard(
            self.table.clone(),
            self.accessor_for(access_token),
            document,
            &self.config.navigation,
        )
    }
}
