use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::models::{LastSearch, Title, WatchItem, WatchlistStats};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: u64,
    pub title: String,
    pub completed: bool,
}

impl From<&WatchItem> for ItemResponse {
    fn from(item: &WatchItem) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            completed: item.completed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub id: u64,
    pub completed: bool,
}

#[derive(Debug, Serialize)]
pub struct EditResponse {
    pub id: u64,
    pub draft: String,
}

#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Snapshot of the watchlist in insertion order
pub async fn get_items(State(state): State<AppState>) -> Json<Vec<ItemResponse>> {
    let watchlist = state.watchlist.read().await;
    let items = watchlist.items().iter().map(ItemResponse::from).collect();
    Json(items)
}

/// Add a new item
///
/// A blank title is a no-op, not an error: the response is 200 with no
/// body item rather than 201.
pub async fn add_item(
    State(state): State<AppState>,
    Json(request): Json<AddItemRequest>,
) -> (StatusCode, Json<Option<ItemResponse>>) {
    let mut watchlist = state.watchlist.write().await;
    match watchlist.add(&request.title) {
        Some(item) => (StatusCode::CREATED, Json(Some(ItemResponse::from(item)))),
        None => (StatusCode::OK, Json(None)),
    }
}

/// Remove an item; stale ids are a silent no-op
pub async fn remove_item(State(state): State<AppState>, Path(id): Path<u64>) -> StatusCode {
    let mut watchlist = state.watchlist.write().await;
    watchlist.remove(id);
    StatusCode::NO_CONTENT
}

/// Clear the whole watchlist
pub async fn clear_items(State(state): State<AppState>) -> StatusCode {
    let mut watchlist = state.watchlist.write().await;
    watchlist.clear_all();
    StatusCode::NO_CONTENT
}

/// Toggle an item's completed flag
///
/// Returns the new flag for the toggled item, or no item if the id was
/// stale.
pub async fn toggle_item(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Json<Option<ToggleResponse>> {
    let mut watchlist = state.watchlist.write().await;
    let response = watchlist
        .toggle_complete(id)
        .map(|completed| ToggleResponse { id, completed });
    Json(response)
}

/// Derived total/completed/remaining counters
pub async fn get_stats(State(state): State<AppState>) -> Json<WatchlistStats> {
    let watchlist = state.watchlist.read().await;
    Json(watchlist.stats())
}

/// Open an edit session on an item
pub async fn start_edit(State(state): State<AppState>, Path(id): Path<u64>) -> StatusCode {
    let mut watchlist = state.watchlist.write().await;
    watchlist.start_edit(id);
    StatusCode::NO_CONTENT
}

/// The open edit session, if any
pub async fn get_edit(State(state): State<AppState>) -> Json<Option<EditResponse>> {
    let watchlist = state.watchlist.read().await;
    let response = watchlist.editing().map(|editing| EditResponse {
        id: editing.id,
        draft: editing.draft.clone(),
    });
    Json(response)
}

/// Replace the draft text of the open edit session
pub async fn set_draft(
    State(state): State<AppState>,
    Json(request): Json<DraftRequest>,
) -> StatusCode {
    let mut watchlist = state.watchlist.write().await;
    watchlist.set_draft(request.text);
    StatusCode::NO_CONTENT
}

/// Commit the open edit session
pub async fn save_edit(State(state): State<AppState>) -> StatusCode {
    let mut watchlist = state.watchlist.write().await;
    watchlist.save_edit();
    StatusCode::NO_CONTENT
}

/// Discard the open edit session
pub async fn cancel_edit(State(state): State<AppState>) -> StatusCode {
    let mut watchlist = state.watchlist.write().await;
    watchlist.cancel_edit();
    StatusCode::NO_CONTENT
}

/// Search the configured provider
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<Title>>> {
    let titles = state.search.search(&params.q).await?;
    Ok(Json(titles))
}

/// The cached last query/result pair
pub async fn last_search(State(state): State<AppState>) -> Json<Option<LastSearch>> {
    Json(state.search.last().await)
}
