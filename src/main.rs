//! revaudit - review audit microservice
//!
//! Resolves business listings through an external search provider,
//! ingests and classifies their customer reviews, and persists the
//! results for the removal-request workflow.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use revaudit::config::Config;
use revaudit::services::serpapi_client::SerpApiClient;
use revaudit::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting revaudit microservice");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Resolve configuration; fails fast when the provider key is missing
    let config = Config::load()?;
    info!("Database: {}", config.database_path.display());

    // Open or create the database and run idempotent schema init
    let db_pool = revaudit::db::init_database_pool(&config.database_path).await?;
    info!("Database connection established");

    // Provider client with the injected API key
    let provider = SerpApiClient::new(config.serpapi_api_key.clone())?;

    let state = AppState::new(db_pool, Arc::new(provider));

    let app = revaudit::build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("Listening on http://0.0.0.0:{}", config.port);
    info!("Health check: http://127.0.0.1:{}/health", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
