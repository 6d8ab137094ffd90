//! Impure shell around [`GuardMachine`]: executes effects against the
//! fetch and redirect collaborators and hands the caller a renderable view.

use certforge_client::RoleFetcher;
use certforge_core::RoutePath;

use crate::machine::{Effect, GuardEvent, GuardMachine, GuardPaths};
use crate::profile::{ProfileContext, ProfileSource};

/// Imperative "navigate to path, replacing history" primitive.
pub trait Redirector {
    fn replace(&self, path: &RoutePath);
}

impl<R: Redirector + ?Sized> Redirector for &R {
    fn replace(&self, path: &RoutePath) {
        (**self).replace(path)
    }
}

/// What the caller should render after a navigation settles.
///
/// There is no partial state: anything that is not `Protected` is the
/// blocking placeholder (possibly after a redirect was issued).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardView {
    Protected(ProfileContext),
    Placeholder,
}

/// The guard itself: owns the machine and the collaborators, single-owner
/// mutable state. The `&mut self` navigation surface is the mutual
/// exclusion; no locking is needed or used.
#[derive(Debug)]
pub struct Guard<F, R, P> {
    machine: GuardMachine,
    fetcher: F,
    redirector: R,
    profiles: P,
}

impl<F, R, P> Guard<F, R, P>
where
    F: RoleFetcher,
    R: Redirector,
    P: ProfileSource,
{
    pub fn new(paths: GuardPaths, fetcher: F, redirector: R, profiles: P) -> Self {
        Self {
            machine: GuardMachine::new(paths),
            fetcher,
            redirector,
            profiles,
        }
    }

    pub fn machine(&self) -> &GuardMachine {
        &self.machine
    }

    /// First evaluation after the guard is attached at `path`.
    pub async fn mount(&mut self, path: &str) -> GuardView {
        self.navigate(path).await
    }

    /// Re-evaluate after a navigation. Cheap when a RoleState is cached:
    /// route check only, no fetch.
    pub async fn navigate(&mut self, path: &str) -> GuardView {
        tracing::debug!(%path, "guard navigation");
        let effect = self.machine.handle(GuardEvent::PathChanged(path.to_string()));
        self.run(effect).await
    }

    /// Explicit sign-out: discards the cached RoleState and redirects to the
    /// public entry point.
    pub fn sign_out(&mut self) {
        if let Effect::Redirect(target) = self.machine.handle(GuardEvent::SignedOut) {
            let path = self.machine.paths().redirect_target(target).clone();
            self.redirector.replace(&path);
        }
    }

    async fn run(&mut self, mut effect: Effect) -> GuardView {
        loop {
            match effect {
                Effect::StartFetch => {
                    let result = self.fetcher.fetch_role().await;
                    effect = self.machine.handle(GuardEvent::FetchResolved(result));
                }
                Effect::Redirect(target) => {
                    let path = self.machine.paths().redirect_target(target).clone();
                    self.redirector.replace(&path);
                    return GuardView::Placeholder;
                }
                Effect::RenderProtected => {
                    return match self.machine.role_state() {
                        Some(state) => GuardView::Protected(ProfileContext {
                            user: self.profiles.profile(),
                            role_id: state.role_id.clone(),
                            role_name: state.role_name.clone(),
                            sidebar_menu: state.sidebar_menu.clone(),
                        }),
                        // RenderProtected is only emitted with a cached
                        // RoleState; block rather than leak if that breaks.
                        None => GuardView::Placeholder,
                    };
                }
                Effect::ShowPlaceholder => return GuardView::Placeholder,
            }
        }
    }
}
