//! Guard state machine (pure: events in, effects out).
//!
//! All IO lives in [`crate::driver`]; this machine only decides. That keeps
//! the transition rules testable without a runtime and makes the
//! at-most-one-concurrent-fetch and last-path-wins guarantees explicit
//! state, not accidents of scheduling.

use certforge_authz::is_route_allowed;
use certforge_client::{FetchError, RoleGrant};
use certforge_core::RoutePath;

use crate::role_state::RoleState;

/// Where the guard currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardStatus {
    /// Initial state, nothing evaluated yet.
    Loading,
    /// A role fetch is outstanding.
    RoleFetchInFlight,
    /// Current path is covered; protected content may render.
    Authorized,
    /// Logged in but not allowed here (or fetch failed for a non-auth
    /// reason; fail closed).
    Unauthorized,
    /// No valid session.
    Unauthenticated,
}

/// Inputs to the machine.
#[derive(Debug)]
pub enum GuardEvent {
    /// The guard was attached; evaluate the current path.
    Mounted,
    /// The router reported a navigation.
    PathChanged(String),
    /// The outstanding role fetch finished.
    FetchResolved(Result<RoleGrant, FetchError>),
    /// The user explicitly signed out.
    SignedOut,
}

/// Redirect destinations, resolved to paths via [`GuardPaths`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTarget {
    /// The dedicated unauthorized-access page.
    Unauthorized,
    /// The public entry point (login).
    PublicEntry,
}

/// What the driver should do next. The machine never performs these itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Invoke the role fetcher; feed the result back as `FetchResolved`.
    StartFetch,
    /// Navigate away, replacing history.
    Redirect(RedirectTarget),
    /// Render the protected content under the resolved profile context.
    RenderProtected,
    /// Render the blocking placeholder (no partial protected render, ever).
    ShowPlaceholder,
}

/// The guard's fixed navigation anchors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardPaths {
    /// Post-login landing route; always allowed for authenticated users.
    pub home: RoutePath,
    pub unauthorized: RoutePath,
    pub public_entry: RoutePath,
}

impl Default for GuardPaths {
    fn default() -> Self {
        Self {
            home: RoutePath::new("/main/home"),
            unauthorized: RoutePath::new("/unauthorized"),
            public_entry: RoutePath::new("/"),
        }
    }
}

impl GuardPaths {
    pub fn redirect_target(&self, target: RedirectTarget) -> &RoutePath {
        match target {
            RedirectTarget::Unauthorized => &self.unauthorized,
            RedirectTarget::PublicEntry => &self.public_entry,
        }
    }
}

/// The reactive authorization guard, minus its IO.
///
/// # Invariants
/// - At most one fetch is outstanding at a time (`fetch_in_flight`).
/// - A navigation arriving while a fetch is outstanding does not start a
///   second fetch; the resolution is evaluated against the path current at
///   resolution time (last-path-wins).
/// - Zero-module grants are never cached.
/// - A cached `RoleState` survives route denials; only sign-out or an
///   authentication failure discards it.
#[derive(Debug)]
pub struct GuardMachine {
    paths: GuardPaths,
    status: GuardStatus,
    current_path: RoutePath,
    fetch_in_flight: bool,
    role_state: Option<RoleState>,
}

impl GuardMachine {
    pub fn new(paths: GuardPaths) -> Self {
        Self {
            paths,
            status: GuardStatus::Loading,
            current_path: RoutePath::root(),
            fetch_in_flight: false,
            role_state: None,
        }
    }

    pub fn status(&self) -> GuardStatus {
        self.status
    }

    pub fn paths(&self) -> &GuardPaths {
        &self.paths
    }

    pub fn current_path(&self) -> &RoutePath {
        &self.current_path
    }

    pub fn role_state(&self) -> Option<&RoleState> {
        self.role_state.as_ref()
    }

    /// Advance the machine by one event.
    pub fn handle(&mut self, event: GuardEvent) -> Effect {
        match event {
            GuardEvent::Mounted => self.evaluate(),
            GuardEvent::PathChanged(path) => {
                self.current_path = RoutePath::new(path);
                self.evaluate()
            }
            GuardEvent::FetchResolved(result) => self.on_fetch_resolved(result),
            GuardEvent::SignedOut => {
                tracing::debug!("signed out, discarding role state");
                self.role_state = None;
                // A fetch resolving after sign-out must not resurrect the
                // session; dropping the flag makes its resolution a no-op.
                self.fetch_in_flight = false;
                self.status = GuardStatus::Unauthenticated;
                Effect::Redirect(RedirectTarget::PublicEntry)
            }
        }
    }

    /// Cheap per-navigation re-evaluation: route check only, no refetch
    /// while a RoleState is cached.
    fn evaluate(&mut self) -> Effect {
        if let Some(state) = &self.role_state {
            return if is_route_allowed(
                self.current_path.as_str(),
                &state.allowed_routes,
                &self.paths.home,
            ) {
                self.status = GuardStatus::Authorized;
                Effect::RenderProtected
            } else {
                tracing::warn!(path = %self.current_path, "route not covered by role, redirecting");
                self.status = GuardStatus::Unauthorized;
                Effect::Redirect(RedirectTarget::Unauthorized)
            };
        }

        if self.fetch_in_flight {
            // Collapse into the outstanding fetch; the recorded path wins
            // when the result lands.
            self.status = GuardStatus::RoleFetchInFlight;
            return Effect::ShowPlaceholder;
        }

        self.fetch_in_flight = true;
        self.status = GuardStatus::RoleFetchInFlight;
        Effect::StartFetch
    }

    fn on_fetch_resolved(&mut self, result: Result<RoleGrant, FetchError>) -> Effect {
        if !self.fetch_in_flight {
            tracing::debug!("ignoring fetch resolution with no fetch outstanding");
            return self.render_current();
        }
        self.fetch_in_flight = false;

        match result {
            Ok(grant) if grant.modules.is_empty() => {
                tracing::warn!(role = %grant.role_name, "role grants no modules");
                self.status = GuardStatus::Unauthorized;
                Effect::Redirect(RedirectTarget::Unauthorized)
            }
            Ok(grant) => {
                let state = RoleState::from_grant(grant);
                tracing::debug!(
                    role = %state.role_name,
                    routes = state.allowed_routes.len(),
                    "role state cached for session"
                );
                self.role_state = Some(state);
                self.evaluate()
            }
            Err(err) if err.is_unauthenticated() => {
                tracing::warn!(error = %err, "session invalid, redirecting to public entry");
                self.role_state = None;
                self.status = GuardStatus::Unauthenticated;
                Effect::Redirect(RedirectTarget::PublicEntry)
            }
            Err(err) => {
                tracing::error!(error = %err, "role fetch failed, failing closed");
                self.status = GuardStatus::Unauthorized;
                Effect::Redirect(RedirectTarget::Unauthorized)
            }
        }
    }

    fn render_current(&self) -> Effect {
        match self.status {
            GuardStatus::Authorized => Effect::RenderProtected,
            _ => Effect::ShowPlaceholder,
        }
    }
}
