use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Session lifecycle
        .route("/token", get(handlers::issue_token))
        .route("/end-session", post(handlers::end_session))
        .route(
            "/handoff-status/:session_id",
            get(handlers::handoff_status),
        )
        // Call log queries
        .route("/call-summary", get(handlers::call_summary))
        .route("/call-logs", get(handlers::call_logs))
        // Request logging + browser client access
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
