//! In-memory role fetcher for tests/dev.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::fetcher::{FetchError, RoleFetcher, RoleGrant};

/// Role fetcher that returns a fixed outcome and counts its calls.
///
/// The call counter is what lets tests assert the guard's
/// at-most-one-fetch-per-session behavior.
#[derive(Debug)]
pub struct StaticRoleFetcher {
    outcome: Result<RoleGrant, FetchError>,
    calls: AtomicUsize,
}

impl StaticRoleFetcher {
    pub fn returning(grant: RoleGrant) -> Self {
        Self {
            outcome: Ok(grant),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: FetchError) -> Self {
        Self {
            outcome: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times `fetch_role` has been invoked.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RoleFetcher for StaticRoleFetcher {
    async fn fetch_role(&self) -> Result<RoleGrant, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use certforge_core::RoleId;

    #[tokio::test]
    async fn counts_calls() {
        let fetcher = StaticRoleFetcher::returning(RoleGrant {
            role_id: RoleId::new("r1"),
            role_name: "Viewer".to_string(),
            modules: vec![],
        });

        assert_eq!(fetcher.call_count(), 0);
        let _ = fetcher.fetch_role().await;
        let _ = fetcher.fetch_role().await;
        assert_eq!(fetcher.call_count(), 2);
    }
}
