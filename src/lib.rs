//! virtual-interview library interface
//!
//! Exposes the router and application state for the binary and for
//! integration tests.

pub mod api;
pub mod artifacts;
pub mod config;
pub mod error;
pub mod questions;
pub mod store;
pub mod transcoder;
pub mod transcriber;

pub use crate::error::{ApiError, ApiResult};

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::store::ObjectStore;

/// Largest accepted upload. Browser interview recordings run a few MB per
/// minute; this leaves generous headroom.
const MAX_UPLOAD_BYTES: usize = 256 * 1024 * 1024;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Process-wide configuration
    pub config: Arc<Config>,
    /// Object store backend (S3 or in-memory)
    pub store: Arc<dyn ObjectStore>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn ObjectStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::ui_routes())
        .merge(api::interview_routes())
        .merge(api::media_routes())
        .merge(api::feedback_routes())
        .merge(api::health_routes())
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
