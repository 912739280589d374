use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single title the user intends to watch later
///
/// This is the unit of the persisted watchlist. `id` is assigned once at
/// creation and never changes; `title` is stored trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchItem {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Derived counters over the watchlist, recomputed on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WatchlistStats {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
}

/// An in-progress title edit: which item is being edited and the draft text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditSession {
    pub id: u64,
    pub draft: String,
}

/// A movie or TV show title returned from the search provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub id: u64,
    pub title: String,
    pub release_year: Option<i32>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
}

/// The cached last query/result pair, rewritten wholesale on every search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastSearch {
    pub query: String,
    pub results: Vec<Title>,
    pub fetched_at: DateTime<Utc>,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// One result from TMDB's /search/movie endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl From<TmdbMovie> for Title {
    fn from(movie: TmdbMovie) -> Self {
        // TMDB dates are "YYYY-MM-DD"; an empty string means unknown
        let release_year = movie
            .release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .and_then(|y| y.parse().ok());

        // Overviews come back as "" for obscure titles; treat that as absent
        let overview = movie.overview.filter(|o| !o.is_empty());

        Title {
            id: movie.id,
            title: movie.title,
            release_year,
            overview,
            poster_path: movie.poster_path,
        }
    }
}
