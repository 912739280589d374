use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Watchlist
        .route("/items", get(handlers::get_items))
        .route("/items", post(handlers::add_item))
        .route("/items", delete(handlers::clear_items))
        .route("/items/:id", delete(handlers::remove_item))
        .route("/items/:id/toggle", post(handlers::toggle_item))
        .route("/stats", get(handlers::get_stats))
        // Edit session
        .route("/items/:id/edit", post(handlers::start_edit))
        .route("/edit", get(handlers::get_edit))
        .route("/edit/draft", put(handlers::set_draft))
        .route("/edit/save", post(handlers::save_edit))
        .route("/edit/cancel", post(handlers::cancel_edit))
        // Search
        .route("/search", get(handlers::search))
        .route("/search/last", get(handlers::last_search))
}
