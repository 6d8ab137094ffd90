//! Sidebar menu construction.
//!
//! The identity service sends modules as a flat parent-pointer list. This
//! module derives the one canonical tree from that list; both the sidebar
//! renderer and the route extractor (`crate::routes`) consume the same tree,
//! so a module orphaned from the menu is also absent from the allowed-route
//! set.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use certforge_core::{ModuleId, RoutePath};

use crate::Module;

/// One node of the nested sidebar menu, ready for rendering.
///
/// Icon keys stay symbolic here; mapping a key to a renderable icon is the
/// renderer's job (see [`crate::resolve_icon`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuNode {
    pub id: ModuleId,
    pub name: String,
    pub route: Option<RoutePath>,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    /// Depth-first `(depth, node)` pairs rooted at this node.
    ///
    /// Used by breadcrumb and collapsed-menu rendering, which work on a flat
    /// view of the same tree the sidebar nests.
    pub fn flatten(&self) -> Vec<(usize, &MenuNode)> {
        let mut out = Vec::new();
        self.flatten_into(0, &mut out);
        out
    }

    fn flatten_into<'a>(&'a self, depth: usize, out: &mut Vec<(usize, &'a MenuNode)>) {
        out.push((depth, self));
        for child in &self.children {
            child.flatten_into(depth + 1, out);
        }
    }
}

/// Build the nested menu forest from a flat module list.
///
/// - Roots are exactly the modules with no `parent_id`.
/// - A module whose declared parent is not in the list is dropped (orphan).
/// - Roots and every child list are sorted ascending by `sort_order`;
///   ties keep the input order (stable sort).
/// - The descent carries a visited set, so malformed input (duplicate ids,
///   cyclic parent chains) terminates instead of recursing forever.
pub fn build_module_tree(modules: &[Module]) -> Vec<MenuNode> {
    let known: HashSet<&ModuleId> = modules.iter().map(|m| &m.id).collect();

    let mut children: HashMap<&ModuleId, Vec<&Module>> = HashMap::new();
    let mut roots: Vec<&Module> = Vec::new();

    for module in modules {
        match &module.parent_id {
            None => roots.push(module),
            Some(parent_id) if known.contains(parent_id) => {
                children.entry(parent_id).or_default().push(module);
            }
            Some(parent_id) => {
                tracing::warn!(
                    module_id = %module.id,
                    parent_id = %parent_id,
                    "dropping module with dangling parent reference"
                );
            }
        }
    }

    // `sort_by_key` is stable, which is what keeps equal sort_order siblings
    // in input order.
    roots.sort_by_key(|m| m.sort_order);

    let mut visited: HashSet<&ModuleId> = HashSet::new();
    roots
        .into_iter()
        .filter_map(|root| emit(root, &children, &mut visited))
        .collect()
}

fn emit<'a>(
    module: &'a Module,
    children: &HashMap<&'a ModuleId, Vec<&'a Module>>,
    visited: &mut HashSet<&'a ModuleId>,
) -> Option<MenuNode> {
    if !visited.insert(&module.id) {
        tracing::warn!(module_id = %module.id, "module visited twice while building menu, skipping");
        return None;
    }

    let mut kids: Vec<&Module> = children.get(&module.id).cloned().unwrap_or_default();
    kids.sort_by_key(|m| m.sort_order);

    let child_nodes = kids
        .into_iter()
        .filter_map(|kid| emit(kid, children, visited))
        .collect();

    Some(MenuNode {
        id: module.id.clone(),
        name: module.name.clone(),
        route: module
            .route
            .as_deref()
            .filter(|r| !r.is_empty())
            .map(RoutePath::new),
        icon: module.icon.clone(),
        sort_order: module.sort_order,
        children: child_nodes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn module(id: &str, parent: Option<&str>, route: Option<&str>, sort_order: i32) -> Module {
        Module {
            id: ModuleId::new(id.to_string()),
            name: id.to_uppercase(),
            route: route.map(str::to_string),
            icon: None,
            parent_id: parent.map(|p| ModuleId::new(p.to_string())),
            sort_order,
            status: None,
            permission_type: None,
        }
    }

    #[test]
    fn nests_children_under_parents() {
        let modules = vec![
            module("events", None, Some("/main/events"), 1),
            module("templates", None, Some("/main/templates"), 2),
            module("event-list", Some("events"), Some("/main/events/list"), 1),
        ];

        let tree = build_module_tree(&modules);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].id, ModuleId::new("events"));
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].id, ModuleId::new("event-list"));
        assert!(tree[1].children.is_empty());
    }

    #[test]
    fn orphan_with_dangling_parent_is_dropped() {
        let modules = vec![
            module("events", None, Some("/main/events"), 1),
            module("ghost", Some("missing"), Some("/main/ghost"), 1),
        ];

        let tree = build_module_tree(&modules);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].id, ModuleId::new("events"));
    }

    #[test]
    fn siblings_sorted_by_sort_order() {
        let modules = vec![
            module("b", None, None, 2),
            module("a", None, None, 1),
            module("c", None, None, 3),
        ];

        let tree = build_module_tree(&modules);
        let ids: Vec<&str> = tree.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn equal_sort_order_keeps_input_order() {
        let modules = vec![
            module("first", None, None, 5),
            module("second", None, None, 5),
            module("third", None, None, 5),
        ];

        let tree = build_module_tree(&modules);
        let ids: Vec<&str> = tree.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn organizational_nodes_without_routes_are_preserved() {
        let modules = vec![
            module("admin", None, None, 1),
            module("settings", Some("admin"), Some("/main/settings"), 1),
        ];

        let tree = build_module_tree(&modules);
        assert_eq!(tree.len(), 1);
        assert!(tree[0].route.is_none());
        assert_eq!(tree[0].children.len(), 1);
    }

    #[test]
    fn cyclic_parent_chain_terminates() {
        // a -> b -> a plus one legitimate root pointing into the cycle.
        let modules = vec![
            module("root", None, Some("/main/home"), 1),
            module("a", Some("b"), None, 1),
            module("b", Some("a"), None, 1),
        ];

        let tree = build_module_tree(&modules);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].id, ModuleId::new("root"));
    }

    #[test]
    fn duplicate_id_is_emitted_once() {
        let modules = vec![
            module("dup", None, Some("/main/a"), 1),
            module("dup", None, Some("/main/b"), 2),
        ];

        let tree = build_module_tree(&modules);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn flatten_yields_depth_first_pairs() {
        let modules = vec![
            module("root", None, None, 1),
            module("child", Some("root"), None, 1),
            module("grandchild", Some("child"), None, 1),
        ];

        let tree = build_module_tree(&modules);
        let flat = tree[0].flatten();
        let depths: Vec<usize> = flat.iter().map(|(d, _)| *d).collect();
        assert_eq!(depths, vec![0, 1, 2]);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: root ordering is ascending by sort_order and stable
        /// within equal keys, for any sort_order assignment.
        #[test]
        fn root_order_is_sorted_and_stable(orders in prop::collection::vec(0i32..4, 1..12)) {
            let modules: Vec<Module> = orders
                .iter()
                .enumerate()
                .map(|(i, order)| module(&format!("m{i}"), None, None, *order))
                .collect();

            let tree = build_module_tree(&modules);
            prop_assert_eq!(tree.len(), modules.len());

            for pair in tree.windows(2) {
                prop_assert!(pair[0].sort_order <= pair[1].sort_order);
                if pair[0].sort_order == pair[1].sort_order {
                    // Ids encode input position, so stability is checkable.
                    let a: usize = pair[0].id.as_str()[1..].parse().unwrap();
                    let b: usize = pair[1].id.as_str()[1..].parse().unwrap();
                    prop_assert!(a < b);
                }
            }
        }
    }
}
