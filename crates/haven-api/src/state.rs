//! Shared application state for all handlers.

use std::sync::Arc;

use haven_arena::Matchmaker;
use haven_quota::{QuotaKeeper, QuotaLimits};
use haven_stats::{BrainTracker, MatchTracker};
use haven_store::KvStore;

use crate::profile::ProfileReader;

/// Type-erased store handle shared by every component.
pub type SharedStore = Arc<dyn KvStore>;

/// Shared state for all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub quota: Arc<QuotaKeeper<SharedStore>>,
    pub matches: Arc<MatchTracker<SharedStore>>,
    pub brain: Arc<BrainTracker<SharedStore>>,
    pub arena: Arc<Matchmaker<SharedStore>>,
    pub profiles: ProfileReader,
}

impl AppState {
    /// Wire every component onto one store.
    pub fn new(store: SharedStore, limits: QuotaLimits) -> Self {
        Self {
            quota: Arc::new(QuotaKeeper::new(store.clone(), limits)),
            matches: Arc::new(MatchTracker::new(store.clone())),
            brain: Arc::new(BrainTracker::new(store.clone())),
            arena: Arc::new(Matchmaker::new(store.clone())),
            profiles: ProfileReader::new(store),
        }
    }
}
