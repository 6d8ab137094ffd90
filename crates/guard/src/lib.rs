//! `certforge-guard` — the authorization guard in front of protected pages.
//!
//! The guard sequences session validation, role fetch, and route
//! authorization before any protected content renders. It is split the way
//! the rest of the workspace is split: [`machine`] is a pure state machine
//! (events in, effects out, no IO), and [`driver`] is the impure shell that
//! executes effects against the fetch/redirect collaborators.

pub mod driver;
pub mod machine;
pub mod profile;
pub mod role_state;

pub use driver::{Guard, GuardView, Redirector};
pub use machine::{Effect, GuardEvent, GuardMachine, GuardPaths, GuardStatus, RedirectTarget};
pub use profile::{ProfileContext, ProfileSource, StaticProfileSource, UserProfile};
pub use role_state::RoleState;
