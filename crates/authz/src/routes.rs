//! Allowed-route set extraction and the route-allowance predicate.
//!
//! Both operations are pure and cheap; the guard re-runs them on every
//! navigation without refetching anything.

use std::collections::BTreeSet;

use serde::Serialize;

use certforge_core::RoutePath;

use crate::MenuNode;

/// Normalized set of route prefixes the current role may access.
///
/// Granting a route grants its entire subtree (`/main/events` covers
/// `/main/events/5`). Backed by an ordered set so diagnostics output is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteSet(BTreeSet<RoutePath>);

impl RouteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, route: RoutePath) -> bool {
        self.0.insert(route)
    }

    pub fn contains(&self, route: &RoutePath) -> bool {
        self.0.contains(route)
    }

    /// Whether `path` is covered by any entry (exact or subtree prefix).
    pub fn covers(&self, path: &RoutePath) -> bool {
        self.0.iter().any(|entry| path.is_covered_by(entry))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoutePath> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<RoutePath> for RouteSet {
    fn from_iter<I: IntoIterator<Item = RoutePath>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Collect every navigable route reachable from the given menu forest.
///
/// Depth-first walk; route-less organizational nodes contribute nothing but
/// their children are still visited. Duplicates collapse (set semantics).
pub fn extract_routes(menu: &[MenuNode]) -> RouteSet {
    let mut routes = RouteSet::new();
    for node in menu {
        collect(node, &mut routes);
    }
    routes
}

fn collect(node: &MenuNode, routes: &mut RouteSet) {
    if let Some(route) = &node.route {
        routes.insert(route.clone());
    }
    for child in &node.children {
        collect(child, routes);
    }
}

/// Decide whether `pathname` may be rendered given the allowed-route set.
///
/// The home path is always allowed, even against an empty set, so every
/// authenticated user can reach the post-login landing page before any
/// module grants it explicitly. Everything else is exact-or-prefix match,
/// denied by default.
pub fn is_route_allowed(pathname: &str, routes: &RouteSet, home: &RoutePath) -> bool {
    let path = RoutePath::new(pathname);
    if path == *home {
        return true;
    }
    routes.covers(&path)
}
