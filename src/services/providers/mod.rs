/// Movie search provider abstraction
///
/// The watchlist itself never touches the network; search is a pass-through
/// to whichever external movie database is configured. The trait keeps the
/// HTTP surface and the search cache independent of any one vendor.
use crate::{error::AppResult, models::Title};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for external movie search providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Search for titles matching a free-text query
    async fn search(&self, query: &str) -> AppResult<Vec<Title>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
