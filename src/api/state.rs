use std::sync::Arc;

use tokio::sync::RwLock;

use crate::services::providers::SearchProvider;
use crate::services::SearchFeature;
use crate::storage::LocalStore;
use crate::watchlist::Watchlist;

/// Shared application state
///
/// The watchlist sits behind a single lock, so intents are applied one at a
/// time in arrival order. The store instance is constructed here, once per
/// session, and only ever reached through this state.
#[derive(Clone)]
pub struct AppState {
    pub watchlist: Arc<RwLock<Watchlist>>,
    pub search: Arc<SearchFeature>,
}

impl AppState {
    /// Creates application state, restoring persisted data from `store`
    pub fn new(store: LocalStore, provider: Arc<dyn SearchProvider>) -> Self {
        Self {
            watchlist: Arc::new(RwLock::new(Watchlist::load(store.clone()))),
            search: Arc::new(SearchFeature::new(provider, store)),
        }
    }
}
