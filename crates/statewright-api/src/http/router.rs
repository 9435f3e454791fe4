//! Axum router configuration with middleware.
//!
//! All engine routes are under `/api/v1/`.
//! Middleware: CORS, request tracing.

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .merge(handlers::definition::definition_routes())
        .merge(handlers::instance::instance_routes());

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/", get(welcome))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - Greeting pointing at the API root.
async fn welcome() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "message": "Welcome to the statewright workflow engine API. Routes live under /api/v1.",
    }))
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
