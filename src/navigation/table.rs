use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use tracing::{debug, info};

use super::pattern::{PathPattern, PatternError};
use super::route::{ResolvedRoute, RouteConfig, RouteDescriptor, ViewRef};

/// Misconfigurations detected while building the table. All are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum RouteTableError {
    #[error("invalid path for route '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: PatternError,
    },
    #[error("route name '{0}' is declared more than once")]
    DuplicateName(String),
    #[error("path pattern '{0}' is declared more than once")]
    DuplicatePattern(String),
    #[error("login route '{0}' is missing from the route table")]
    MissingLoginRoute(String),
}

/// A table entry together with the chain of descriptors it matches through.
#[derive(Debug)]
struct RouteRecord {
    chain: Vec<Arc<RouteDescriptor>>,
}

impl RouteRecord {
    fn descriptor(&self) -> &Arc<RouteDescriptor> {
        &self.chain[self.chain.len() - 1]
    }
}

/// Static mapping from path patterns to route descriptors, built once at startup.
#[derive(Debug)]
pub struct RouteTable {
    records: Vec<RouteRecord>,
    login_route: String,
}

impl RouteTable {
    /// Builds and validates the table. `login_route` must name one of the routes.
    pub fn new(configs: &[RouteConfig], login_route: &str) -> Result<Self, RouteTableError> {
        let mut records = Vec::new();
        for config in configs {
            flatten(config, None, &[], &mut records)?;
        }

        let mut names = HashSet::new();
        let mut patterns = HashSet::new();
        for record in &records {
            let descriptor = record.descriptor();
            if !names.insert(descriptor.name.clone()) {
                return Err(RouteTableError::DuplicateName(descriptor.name.clone()));
            }
            if !patterns.insert(descriptor.pattern.key()) {
                return Err(RouteTableError::DuplicatePattern(
                    descriptor.pattern.to_string(),
                ));
            }
        }

        if !names.contains(login_route) {
            return Err(RouteTableError::MissingLoginRoute(login_route.to_string()));
        }

        info!(
            "Route table built with {} routes (login route '{}')",
            records.len(),
            login_route
        );
        Ok(RouteTable {
            records,
            login_route: login_route.to_string(),
        })
    }

    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All descriptors in declaration order (parents before their children).
    pub fn descriptors(&self) -> impl Iterator<Item = &Arc<RouteDescriptor>> {
        self.records.iter().map(RouteRecord::descriptor)
    }

    /// Resolves a concrete path, which may carry a query string or fragment.
    /// `None` means no route matches.
    pub fn resolve(&self, location: &str) -> Option<ResolvedRoute> {
        let (without_fragment, _) = location.split_once('#').unwrap_or((location, ""));
        let (path, query) = match without_fragment.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (without_fragment, None),
        };

        let mut best: Option<(&RouteRecord, BTreeMap<String, String>)> = None;
        for record in &self.records {
            let Some(params) = record.descriptor().pattern.matches(path) else {
                continue;
            };
            let better = match &best {
                None => true,
                Some((current, _)) => record
                    .descriptor()
                    .pattern
                    .specificity_cmp(&current.descriptor().pattern)
                    .is_gt(),
            };
            if better {
                best = Some((record, params));
            }
        }

        let Some((record, params)) = best else {
            debug!("No route matches '{}'", location);
            return None;
        };
        let path = if path.is_empty() { "/" } else { path };
        Some(ResolvedRoute {
            name: record.descriptor().name.clone(),
            path: path.to_string(),
            params,
            query: query.filter(|q| !q.is_empty()),
            matched: record.chain.clone(),
        })
    }

    /// Resolves a route by name, filling its parameters in.
    pub fn resolve_named(
        &self,
        name: &str,
        params: &BTreeMap<String, String>,
    ) -> Option<ResolvedRoute> {
        let record = self
            .records
            .iter()
            .find(|record| record.descriptor().name == name)?;
        let path = record.descriptor().pattern.build(params)?;
        let params = record.descriptor().pattern.matches(&path)?;
        Some(ResolvedRoute {
            name: name.to_string(),
            path,
            params,
            query: None,
            matched: record.chain.clone(),
        })
    }
}

fn flatten(
    config: &RouteConfig,
    parent: Option<(&PathPattern, usize)>,
    ancestors: &[Arc<RouteDescriptor>],
    records: &mut Vec<RouteRecord>,
) -> Result<(), RouteTableError> {
    let pattern = match parent {
        Some((parent, _)) => PathPattern::join(parent, &config.path),
        None => PathPattern::parse(&config.path),
    }
    .map_err(|source| RouteTableError::InvalidPattern {
        name: config.name.clone(),
        source,
    })?;

    let view = if config.lazy {
        ViewRef::Lazy(config.view.clone())
    } else {
        ViewRef::Eager(config.view.clone())
    };
    let descriptor = Arc::new(RouteDescriptor {
        name: config.name.clone(),
        pattern,
        view,
        title: config.title.clone(),
        auth_required: config.auth_required,
    });

    let mut chain = ancestors.to_vec();
    chain.push(descriptor.clone());
    let record = RouteRecord {
        chain: chain.clone(),
    };

    // A child sharing its parent's path (e.g. `path: ""`) is the parent's
    // default view and takes over the parent's record. A second such child
    // is pushed and later rejected as a duplicate pattern.
    let index = match parent {
        Some((parent_pattern, parent_index))
            if parent_pattern.key() == descriptor.pattern.key()
                && records[parent_index].chain.len() == ancestors.len() =>
        {
            debug!(
                "Route '{}' is the default child of '{}'",
                descriptor.name,
                records[parent_index].descriptor().name
            );
            records[parent_index] = record;
            parent_index
        }
        _ => {
            records.push(record);
            records.len() - 1
        }
    };

    for child in &config.children {
        flatten(child, Some((&descriptor.pattern, index)), &chain, records)?;
    }
    Ok(())
}
