use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{LastSearch, Title},
    services::providers::SearchProvider,
    storage::{LocalStore, LAST_SEARCH_KEY},
};

/// The search feature: a pass-through to the configured provider, plus a
/// durable cache of the last query/result pair
///
/// Queries are sequenced with a token so that a slow earlier request can
/// never clobber the cache entry written by a faster later one. The result
/// of each call is still returned to its own caller either way; sequencing
/// only guards the shared "last search" state.
pub struct SearchFeature {
    provider: Arc<dyn SearchProvider>,
    store: LocalStore,
    seq: AtomicU64,
    last: RwLock<Option<LastSearch>>,
}

impl SearchFeature {
    /// Creates the feature, restoring the last-search cache from storage
    pub fn new(provider: Arc<dyn SearchProvider>, store: LocalStore) -> Self {
        let last = store.load(LAST_SEARCH_KEY);

        Self {
            provider,
            store,
            seq: AtomicU64::new(0),
            last: RwLock::new(last),
        }
    }

    /// Searches the provider and updates the last-search cache
    ///
    /// Blank queries are rejected before any network traffic.
    pub async fn search(&self, query: &str) -> AppResult<Vec<Title>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let token = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let results = self.provider.search(query).await?;

        if token == self.seq.load(Ordering::SeqCst) {
            let record = LastSearch {
                query: query.to_string(),
                results: results.clone(),
                fetched_at: Utc::now(),
            };
            self.store.save(LAST_SEARCH_KEY, &record);
            *self.last.write().await = Some(record);
        } else {
            tracing::debug!(query = %query, token, "Dropping stale search response");
        }

        Ok(results)
    }

    /// The cached last query/result pair, if any search has completed
    pub async fn last(&self) -> Option<LastSearch> {
        self.last.read().await.clone()
    }
}
