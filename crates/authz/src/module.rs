//! Authorization module model (transport-agnostic).
//!
//! A `Module` is one node of the authorization tree declared by the identity
//! service for the caller's role. The wire payload uses camelCase keys.

use serde::{Deserialize, Serialize};

use certforge_core::ModuleId;

/// One node of the server-declared authorization tree.
///
/// # Invariants
/// - `id` is unique within one authorization response.
/// - `parent_id`, if present, should reference another module in the same
///   response; a dangling reference makes the module an orphan and it is
///   dropped when the tree is built.
/// - Sibling order is `sort_order` ascending, stable on ties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: ModuleId,

    /// Display label.
    pub name: String,

    /// Absolute route path, or `None` for a purely organizational node.
    #[serde(default)]
    pub route: Option<String>,

    /// Symbolic icon key, resolved by [`crate::resolve_icon`].
    #[serde(default)]
    pub icon: Option<String>,

    /// Parent module id; `None` marks a root.
    #[serde(default)]
    pub parent_id: Option<ModuleId>,

    /// Ordering among siblings.
    #[serde(default)]
    pub sort_order: i32,

    /// Opaque passthrough attribute, not interpreted here.
    #[serde(default)]
    pub status: Option<String>,

    /// Opaque passthrough attribute, not interpreted here.
    #[serde(default)]
    pub permission_type: Option<String>,
}

impl Module {
    /// Whether this module maps to a navigable route.
    pub fn is_navigable(&self) -> bool {
        self.route.as_deref().is_some_and(|r| !r.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_wire_payload() {
        let json = r#"{
            "id": "m1",
            "name": "Events",
            "route": "/main/events",
            "icon": "calendar",
            "parentId": null,
            "sortOrder": 1,
            "status": "active",
            "permissionType": "read"
        }"#;

        let module: Module = serde_json::from_str(json).unwrap();
        assert_eq!(module.id, ModuleId::new("m1"));
        assert_eq!(module.route.as_deref(), Some("/main/events"));
        assert!(module.parent_id.is_none());
        assert_eq!(module.sort_order, 1);
        assert!(module.is_navigable());
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{ "id": "m2", "name": "Admin" }"#;
        let module: Module = serde_json::from_str(json).unwrap();
        assert!(module.route.is_none());
        assert!(!module.is_navigable());
        assert_eq!(module.sort_order, 0);
    }

    #[test]
    fn empty_route_is_not_navigable() {
        let json = r#"{ "id": "m3", "name": "Section", "route": "" }"#;
        let module: Module = serde_json::from_str(json).unwrap();
        assert!(!module.is_navigable());
    }
}
