//! API Router configuration

use super::handlers;
use super::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the API router
///
/// Notifications are accepted on `POST {collector_path}`; the path is the
/// caller's choice so several collectors can share one listener.
pub fn create_router(state: AppState, collector_path: &str, max_body_size: usize) -> Router {
    Router::new()
        .route(collector_path, post(handlers::collect))
        .route("/health", get(handlers::health_check))
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
