//! Profile context rendered alongside protected content.
//!
//! The guard never fetches or validates identity itself; the session layer
//! supplies the display identity through [`ProfileSource`] and the guard
//! combines it with the cached role snapshot.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use certforge_authz::MenuNode;
use certforge_core::RoleId;

/// The authenticated user's display identity, as the session layer knows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Raw role list from the session token, passed through untouched.
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Supplies the current user's profile once the guard authorizes.
pub trait ProfileSource {
    fn profile(&self) -> UserProfile;
}

impl<P: ProfileSource + ?Sized> ProfileSource for &P {
    fn profile(&self) -> UserProfile {
        (**self).profile()
    }
}

/// Fixed profile source for tests/dev.
#[derive(Debug, Clone)]
pub struct StaticProfileSource(pub UserProfile);

impl ProfileSource for StaticProfileSource {
    fn profile(&self) -> UserProfile {
        self.0.clone()
    }
}

/// Everything the protected layout needs: who the user is, what role they
/// resolved to, and the menu that role grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileContext {
    pub user: UserProfile,
    pub role_id: RoleId,
    pub role_name: String,
    pub sidebar_menu: Vec<MenuNode>,
}
