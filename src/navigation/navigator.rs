use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing::{debug, info, warn};

use super::auth_guard::AuthGuard;
use super::document::DocumentTitle;
use super::guard::{Guard, GuardDecision, NavigationTicket};
use super::route::ResolvedRoute;
use super::table::RouteTable;
use super::title_guard::TitleGuard;
use crate::accessors::{AccessorError, SessionAccessor};
use crate::config::NavigationConfig;

pub const DEFAULT_MAX_REDIRECTS: usize = 8;

/// Why a navigation did not resolve.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error("no route matches '{0}'")]
    NotFound(String),
    #[error("redirect target '{0}' is not a known route")]
    UnknownRoute(String),
    #[error("navigation to '{path}' exceeded {limit} redirects")]
    RedirectLoop { path: String, limit: usize },
    #[error("navigation to '{0}' was superseded by a newer navigation")]
    Superseded(String),
    #[error("identity lookup failed: {0}")]
    AccessorFailed(#[source] AccessorError),
}

/// A navigation that went through every guard.
#[derive(Debug, Clone)]
pub struct Navigation {
    /// The route that was ultimately resolved.
    pub route: ResolvedRoute,
    /// The originally requested location when a guard redirected.
    pub redirected_from: Option<String>,
}

impl Navigation {
    pub fn was_redirected(&self) -> bool {
        self.redirected_from.is_some()
    }
}

/// Runs the ordered guard pipeline in front of every navigation.
///
/// Each call to [`Navigator::navigate`] takes a generation ticket; once a newer
/// navigation has started, the older one stops at its next guard boundary with
/// [`NavigationError::Superseded`].
pub struct Navigator {
    table: Arc<RouteTable>,
    guards: Vec<Arc<dyn Guard>>,
    max_redirects: usize,
    generation: AtomicU64,
}

impl Navigator {
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self {
            table,
            guards: Vec::new(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            generation: AtomicU64::new(0),
        }
    }

    /// Appends a guard; guards run in the order they were added.
    pub fn with_guard(mut self, guard: Arc<dyn Guard>) -> Self {
        self.guards.push(guard);
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// The two-stage pipeline: title first, then authentication.
    pub fn standard(
        table: Arc<RouteTable>,
        accessor: Arc<dyn SessionAccessor>,
        document: Arc<DocumentTitle>,
        config: &NavigationConfig,
    ) -> Self {
        let login_route = table.login_route().to_string();
        let auth = AuthGuard::new(accessor, &login_route)
            .with_failure_policy(config.on_accessor_error)
            .with_timeout(config.accessor_timeout_in_ms.map(Duration::from_millis));

        Navigator::new(table)
            .with_guard(Arc::new(TitleGuard::new(&config.app_name, document)))
            .with_guard(Arc::new(auth))
            .with_max_redirects(config.max_redirects)
    }

    pub fn table(&self) -> &Arc<RouteTable> {
        &self.table
    }

    /// Resolves `location` and runs it through the guards. A redirect restarts
    /// the pipeline for the redirect target.
    pub async fn navigate(&self, location: &str) -> Result<Navigation, NavigationError> {
        let ticket = NavigationTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1);
        debug!("Navigation #{} to '{}' started", ticket.0, location);

        let mut target = self
            .table
            .resolve(location)
            .ok_or_else(|| NavigationError::NotFound(location.to_string()))?;
        let mut redirects = 0;

        'pipeline: loop {
            for guard in &self.guards {
                self.ensure_current(ticket, location)?;
                let decision = guard.check(&target, ticket).await?;
                self.ensure_current(ticket, location)?;

                if let GuardDecision::Redirect(name) = decision {
                    redirects += 1;
                    if redirects > self.max_redirects {
                        warn!("Navigation to '{}' is stuck in a redirect loop", location);
                        return Err(NavigationError::RedirectLoop {
                            path: location.to_string(),
                            limit: self.max_redirects,
                        });
                    }
                    info!(
                        "Guard '{}' redirected navigation from '{}' to '{}'",
                        guard.get_name(),
                        target.path,
                        name
                    );
                    target = self
                        .table
                        .resolve_named(&name, &BTreeMap::new())
                        .ok_or(NavigationError::UnknownRoute(name))?;
                    continue 'pipeline;
                }
            }
            break;
        }

        debug!("Navigation #{} resolved to '{}'", ticket.0, target.name);
        Ok(Navigation {
            route: target,
            redirected_from: (redirects > 0).then(|| location.to_string()),
        })
    }

    fn ensure_current(
        &self,
        ticket: NavigationTicket,
        location: &str,
    ) -> Result<(), NavigationError> {
        if self.generation.load(Ordering::SeqCst) == ticket.0 {
            Ok(())
        } else {
            debug!("Navigation #{} to '{}' was superseded", ticket.0, location);
            Err(NavigationError::Superseded(location.to_string()))
        }
    }
}
