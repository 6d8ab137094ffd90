//! Cached per-session authorization snapshot.

use chrono::{DateTime, Utc};
use serde::Serialize;

use certforge_authz::{MenuNode, Module, RouteSet, build_module_tree, extract_routes};
use certforge_client::RoleGrant;
use certforge_core::RoleId;

/// Everything derived from one successful role fetch.
///
/// Created once per authenticated session and held in memory for its
/// lifetime; ordinary navigation only re-reads `allowed_routes`. Discarded
/// on sign-out or when the session turns out to be invalid. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleState {
    pub role_id: RoleId,
    pub role_name: String,

    /// The raw module list as received from the identity service.
    pub modules: Vec<Module>,

    /// Nested menu derived from `modules`.
    pub sidebar_menu: Vec<MenuNode>,

    /// Flat normalized route-prefix set derived from the same tree as
    /// `sidebar_menu`, so the two always agree on reachability.
    pub allowed_routes: RouteSet,

    pub fetched_at: DateTime<Utc>,
}

impl RoleState {
    /// Derive the session snapshot from a role grant.
    pub fn from_grant(grant: RoleGrant) -> Self {
        let sidebar_menu = build_module_tree(&grant.modules);
        let allowed_routes = extract_routes(&sidebar_menu);

        Self {
            role_id: grant.role_id,
            role_name: grant.role_name,
            modules: grant.modules,
            sidebar_menu,
            allowed_routes,
            fetched_at: Utc::now(),
        }
    }
}
