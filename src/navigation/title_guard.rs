use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::document::DocumentTitle;
use super::guard::{Guard, GuardDecision, NavigationTicket};
use super::navigator::NavigationError;
use super::route::ResolvedRoute;

/// Stage 1: writes `"<route title> | <app name>"` into the document title.
pub struct TitleGuard {
    suffix: String,
    document: Arc<DocumentTitle>,
}

impl TitleGuard {
    pub fn new(app_name: &str, document: Arc<DocumentTitle>) -> Self {
        Self {
            suffix: app_name.to_string(),
            document,
        }
    }

    pub fn format_title(&self, route: &ResolvedRoute) -> String {
        format!("{} | {}", route.title(), self.suffix)
    }
}

#[async_trait]
impl Guard for TitleGuard {
    fn get_name(&self) -> &str {
        "title"
    }

    async fn check(
        &self,
        to: &ResolvedRoute,
        ticket: NavigationTicket,
    ) -> Result<GuardDecision, NavigationError> {
        let title = self.format_title(to);
        if self.document.set_for(ticket, title.clone()) {
            debug!("Setting document title to '{}'", title);
        } else {
            debug!("Navigation #{} is stale; title '{}' dropped", ticket.0, title);
        }
        Ok(GuardDecision::Proceed)
    }
}
