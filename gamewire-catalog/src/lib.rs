//! gamewire-catalog library interface
//!
//! Catalog client, review synthesis, view-state containers and the HTTP
//! surface that serves them to the browser front-end.

pub mod api;
pub mod error;
pub mod render;
pub mod services;
pub mod views;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::services::CatalogSource;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Upstream catalog every view reads from
    pub source: Arc<dyn CatalogSource>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last view failure, for diagnostics
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn record_error(&self, message: impl Into<String>) {
        *self.last_error.write().await = Some(message.into());
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::view_routes())
        .merge(api::facet_routes())
        .merge(api::health_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
