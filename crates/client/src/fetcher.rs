//! Role-fetch contract and error taxonomy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use certforge_authz::Module;
use certforge_core::RoleId;

/// Marker the identity service embeds in failure messages when the session
/// token is missing or expired. Anything else is a plain service failure.
pub const NOT_AUTHENTICATED_MARKER: &str = "not authenticated";

/// The caller's authorization grant: one request per uncached session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleGrant {
    pub role_id: RoleId,
    pub role_name: String,
    #[serde(default)]
    pub modules: Vec<Module>,
}

/// Failure modes surfaced to the guard.
///
/// `Unauthenticated` is the only variant the guard treats specially (redirect
/// to the public entry point); `Service` and `Transport` both fail closed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// No valid session behind the request.
    #[error("not authenticated: {0}")]
    Unauthenticated(String),

    /// The role service answered, but with a failure envelope or status.
    #[error("role service error: {0}")]
    Service(String),

    /// The request never produced a usable answer (network, decode).
    #[error("transport failure: {0}")]
    Transport(String),
}

impl FetchError {
    /// Classify a failure message from the identity service's envelope.
    pub fn classify(message: String) -> Self {
        if message.to_lowercase().contains(NOT_AUTHENTICATED_MARKER) {
            Self::Unauthenticated(message)
        } else {
            Self::Service(message)
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated(_))
    }
}

/// Seam between the guard and the identity/role service.
///
/// One call returns the whole grant; the guard caches it for the session
/// lifetime and never calls again while a cached RoleState exists.
pub trait RoleFetcher {
    fn fetch_role(&self) -> impl Future<Output = Result<RoleGrant, FetchError>>;
}

impl<F: RoleFetcher + ?Sized> RoleFetcher for &F {
    fn fetch_role(&self) -> impl Future<Output = Result<RoleGrant, FetchError>> {
        (**self).fetch_role()
    }
}

impl<F: RoleFetcher + ?Sized> RoleFetcher for std::sync::Arc<F> {
    fn fetch_role(&self) -> impl Future<Output = Result<RoleGrant, FetchError>> {
        (**self).fetch_role()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_splits_on_the_marker() {
        let err = FetchError::classify("User is NOT AUTHENTICATED".to_string());
        assert!(err.is_unauthenticated());

        let err = FetchError::classify("role lookup failed".to_string());
        assert!(matches!(err, FetchError::Service(_)));
    }

    #[test]
    fn role_grant_deserializes_from_camel_case() {
        let json = r#"{
            "roleId": "role-7",
            "roleName": "Operator",
            "modules": [
                { "id": "m1", "name": "Events", "route": "/main/events", "sortOrder": 1 }
            ]
        }"#;

        let grant: RoleGrant = serde_json::from_str(json).unwrap();
        assert_eq!(grant.role_name, "Operator");
        assert_eq!(grant.modules.len(), 1);
    }
}
