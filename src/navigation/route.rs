use std::collections::BTreeMap;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::pattern::PathPattern;

/// One entry of the route table as written in configuration.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct RouteConfig {
    /// Absolute pattern, or relative to the parent for children.
    pub path: String,
    pub name: String,
    /// Component identifier handed to the host for rendering.
    pub view: String,
    /// Whether the component is resolved on first visit rather than up front.
    #[serde(default)]
    pub lazy: bool,
    pub title: String,
    #[serde(default, alias = "auth")]
    pub auth_required: bool,
    #[serde(default)]
    pub children: Vec<RouteConfig>,
}

/// Reference to the component rendered for a route. Resolving it is up to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewRef {
    Eager(String),
    Lazy(String),
}

impl ViewRef {
    pub fn component(&self) -> &str {
        match self {
            ViewRef::Eager(c) | ViewRef::Lazy(c) => c,
        }
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, ViewRef::Lazy(_))
    }
}

/// A validated route table entry.
#[derive(Debug, Clone)]
pub struct RouteDescriptor {
    pub name: String,
    pub pattern: PathPattern,
    pub view: ViewRef,
    pub title: String,
    pub auth_required: bool,
}

/// The outcome of matching a concrete path against the table.
#[derive(Debug, Clone)]
pub struct ResolvedRoute {
    pub name: String,
    /// The concrete path, without query or fragment.
    pub path: String,
    pub params: BTreeMap<String, String>,
    pub query: Option<String>,
    /// Matched descriptors, outermost first. The last one is the route itself.
    pub matched: Vec<Arc<RouteDescriptor>>,
}

impl ResolvedRoute {
    pub fn descriptor(&self) -> &RouteDescriptor {
        // A resolved route always carries at least its own descriptor.
        &self.matched[self.matched.len() - 1]
    }

    pub fn title(&self) -> &str {
        &self.descriptor().title
    }

    /// True if any descriptor in the matched chain asks for a signed-in user.
    pub fn requires_auth(&self) -> bool {
        self.matched.iter().any(|d| d.auth_required)
    }
}

fn route(path: &str, name: &str, view: &str, lazy: bool, title: &str, auth: bool) -> RouteConfig {
    RouteConfig {
        path: path.to_string(),
        name: name.to_string(),
        view: view.to_string(),
        lazy,
        title: title.to_string(),
        auth_required: auth,
        children: Vec::new(),
    }
}

/// The Active Tracker route table.
pub fn default_routes() -> Vec<RouteConfig> {
    vec![
        route("/", "home", "HomeView", false, "Home", false),
        route("/login", "login", "LoginView", true, "Login", false),
        route("/register", "register", "RegisterView", true, "Register", false),
        route("/create", "create", "CreateView", true, "Create Workout", true),
        route(
            "/view-workout/:workoutId",
            "view-workout",
            "ViewWorkoutView",
            true,
            "View Workout",
            false,
        ),
    ]
}
