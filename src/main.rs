use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use streamlist::api::{create_router, AppState};
use streamlist::config::Config;
use streamlist::services::providers::TmdbProvider;
use streamlist::storage::LocalStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let store = LocalStore::open(&config.data_dir)?;
    let provider = Arc::new(TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
    ));

    let state = AppState::new(store, provider);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "StreamList server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
