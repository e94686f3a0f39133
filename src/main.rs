//! taskjournal server entry point.
//!
//! Loads configuration, opens the database, and serves the REST API.

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use taskjournal::api;
use taskjournal::app_state::AppState;
use taskjournal::config::{AppConfig, LogFormat};
use taskjournal::persistence::SqliteStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(addr = %config.listen_addr, "starting taskjournal");

    // Open storage
    let store = SqliteStore::connect(&config).await?;

    // Build application state
    let app_state = AppState::new(store, &config.secret_key);

    // Build router
    let app = api::build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(api::cors_layer(&config.cors));

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
