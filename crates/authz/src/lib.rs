//! `certforge-authz` — pure route-authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and session handling:
//! it turns the identity service's flat module list into the two derived
//! structures the portal runs on (the sidebar menu tree and the allowed-route
//! set) and answers route-allowance queries against them. No IO, no async.

pub mod icons;
pub mod menu;
pub mod module;
pub mod routes;

pub use icons::{IconKind, resolve_icon};
pub use menu::{MenuNode, build_module_tree};
pub use module::Module;
pub use routes::{RouteSet, extract_routes, is_route_allowed};
