//! StayBook web backend
//!
//! Prices stays for the booking widget, keeps explicit user sessions and
//! walks a booking through checkout.

pub mod cache;
pub mod checkout;
pub mod config;
pub mod error;
pub mod pricing;
pub mod session;
pub mod validation;

use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::cache::{AppCache, CacheStats};
use crate::config::Config;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cache: AppCache,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let cache = AppCache::new(&config);
        Self {
            config: Arc::new(config),
            cache,
        }
    }
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(pricing::router())
        .merge(session::router())
        .merge(checkout::router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}
