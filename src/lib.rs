//! revaudit library interface
//!
//! Exposes the application state and router builder so integration
//! tests can drive the API without binding a port.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult, Error, Result};

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::services::provider::ReviewProvider;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Search provider client
    pub provider: Arc<dyn ReviewProvider>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, provider: Arc<dyn ReviewProvider>) -> Self {
        Self {
            db,
            provider,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// CORS is permissive: the service is consumed by a browser frontend
/// served from another origin.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::search_routes())
        .merge(api::review_routes())
        .merge(api::checkout_routes())
        .merge(api::health_routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
