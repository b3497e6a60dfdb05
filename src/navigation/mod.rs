//! Route table and the guard pipeline that runs before every navigation.

pub mod auth_guard;
pub mod document;
pub mod guard;
pub mod navigator;
pub mod pattern;
pub mod route;
pub mod table;
pub mod title_guard;

pub use auth_guard::{AccessorFailurePolicy, AuthGuard};
pub use document::DocumentTitle;
pub use guard::{Guard, GuardDecision, NavigationTicket};
pub use navigator::{Navigation, NavigationError, Navigator};
pub use route::{ResolvedRoute, RouteConfig, RouteDescriptor, ViewRef, default_routes};
pub use table::{RouteTable, RouteTableError};
pub use title_guard::TitleGuard;
