use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Session lifecycle
        .route("/texts", post(handlers::submit_text))
        .route("/texts/:id/recording", post(handlers::start_recording))
        // Results
        .route("/texts/:id/results", get(handlers::get_results))
        .route("/results", get(handlers::get_latest_results))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
