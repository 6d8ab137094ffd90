//! `certforge-client` — role/session fetch boundary.
//!
//! The guard talks to the identity service through the [`RoleFetcher`]
//! trait; this crate provides that seam, the wire DTOs for the identity
//! service's JSON envelope, and two implementations: an HTTP client
//! (production) and an in-memory fetcher (tests/dev).

pub mod fetcher;
pub mod http;
pub mod memory;

pub use fetcher::{FetchError, NOT_AUTHENTICATED_MARKER, RoleFetcher, RoleGrant};
pub use http::HttpRoleClient;
pub use memory::StaticRoleFetcher;
