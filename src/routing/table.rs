//! Automatic routing table.
//!
//! # Responsibilities
//! - Define the lookup contract the resolver falls back on
//! - Provide a concurrent URL-keyed route table
//!
//! # Design Decisions
//! - Lookups never block: DashMap shards reads across locks
//! - Keys ignore trailing slashes on the repository URL
//! - Invalid route URLs are skipped with a warning at build time

use std::sync::Arc;

use dashmap::DashMap;
use url::Url;

use crate::config::schema::RouteConfig;
use crate::routing::types::AutoRoute;

/// Lookup of automatic mirror routes by repository URL.
pub trait MirrorRouter: Send + Sync {
    /// Returns the route for the repository URL, if any.
    fn lookup_by_url(&self, url: &str) -> Option<AutoRoute>;
}

/// A thread-safe table of automatic routes.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    inner: Arc<DashMap<String, AutoRoute>>,
}

fn route_key(url: &str) -> &str {
    url.trim_end_matches('/')
}

impl RouteTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from route configuration.
    pub fn from_config(routes: &[RouteConfig]) -> Self {
        let table = Self::new();

        for route in routes {
            if Url::parse(&route.repository_url).is_err() || Url::parse(&route.route_url).is_err() {
                tracing::warn!(
                    route = %route.id,
                    repository_url = %route.repository_url,
                    route_url = %route.route_url,
                    "Invalid route URL, skipping"
                );
                continue;
            }
            table.insert(&route.repository_url, AutoRoute::new(&route.id, &route.route_url));
        }

        tracing::debug!(routes = table.len(), "Route table built");
        table
    }

    /// Add or replace the route for a repository URL.
    pub fn insert(&self, repository_url: &str, route: AutoRoute) {
        self.inner.insert(route_key(repository_url).to_string(), route);
    }

    /// Remove the route for a repository URL.
    pub fn remove(&self, repository_url: &str) -> Option<AutoRoute> {
        self.inner.remove(route_key(repository_url)).map(|(_, route)| route)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl MirrorRouter for RouteTable {
    fn lookup_by_url(&self, url: &str) -> Option<AutoRoute> {
        self.inner.get(route_key(url)).map(|r| r.value().clone())
    }
}
