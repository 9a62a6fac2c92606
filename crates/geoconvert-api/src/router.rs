use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Largest accepted upload
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))

        // Single points
        .route("/api/v1/convert/to-utm", post(handlers::to_utm))
        .route("/api/v1/convert/to-decimal", post(handlers::to_decimal))

        // Tables
        .route("/api/v1/batch/preview", post(handlers::handle_preview))
        .route("/api/v1/batch", post(handlers::handle_batch))

        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
