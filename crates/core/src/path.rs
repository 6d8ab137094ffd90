//! Normalized route paths (value object: equality by value, not identity).
//!
//! All route comparison in the authorization core happens on normalized
//! paths, so normalization lives here once rather than at every call site.

use serde::{Deserialize, Serialize};

/// An absolute route path with at most one trailing `/` stripped.
///
/// ## Normalization
///
/// `RoutePath::new` strips exactly one trailing slash unless the path is the
/// root `/` itself. The operation is idempotent: normalizing an already
/// normalized path is a no-op.
///
/// ## Prefix semantics
///
/// Granting a route grants its entire subtree: `/main/events` covers
/// `/main/events` and `/main/events/5`, but never `/main/eventsuffix`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutePath(String);

impl RoutePath {
    /// Normalize an incoming path string.
    pub fn new(path: impl Into<String>) -> Self {
        let mut path = path.into();
        if path.len() > 1 && path.ends_with('/') {
            path.pop();
        }
        Self(path)
    }

    /// The root path `/`.
    pub fn root() -> Self {
        Self("/".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Whether `self` falls under `prefix`: equal, or a strict descendant
    /// separated by `/`.
    pub fn is_covered_by(&self, prefix: &RoutePath) -> bool {
        if self.0 == prefix.0 {
            return true;
        }
        match self.0.strip_prefix(prefix.0.as_str()) {
            Some(rest) => rest.starts_with('/'),
            None => false,
        }
    }
}

impl core::fmt::Display for RoutePath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoutePath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
