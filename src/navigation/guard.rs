use super::navigator::NavigationError;
use super::route::ResolvedRoute;

/// Identifies one navigation; a later navigation always carries a larger ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NavigationTicket(pub u64);

/// What a guard wants to happen with the navigation it inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    /// Abandon the destination and navigate to the named route instead.
    Redirect(String),
}

/// A guard runs before a navigation completes and may let it through,
/// redirect it, or fail it.
#[async_trait::async_trait]
pub trait Guard: Send + Sync {
    fn get_name(&self) -> &str;
    async fn check(
        &self,
        to: &ResolvedRoute,
        ticket: NavigationTicket,
    ) -> Result<GuardDecision, NavigationError>;
}
