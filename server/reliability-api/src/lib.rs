//! Reliability Metrics API
//!
//! Read-only HTTP service exposing the engine's queries as JSON.
//! Bind to 127.0.0.1 by default (internal only).

mod error;
mod handlers;
mod state;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

pub use error::{status_for, ApiError};
pub use handlers::{health, metric};
pub use state::AppState;

/// All routes, with permissive CORS.
pub fn app(state: Arc<AppState>) -> Router {
  Router::new()
    .route("/health", get(health))
    .route("/metrics/:name", get(metric))
    .layer(CorsLayer::permissive())
    .with_state(state)
}
