//! HTTP transport.
//!
//! Exposes the scrape pipeline as a single parameterless JSON endpoint plus
//! liveness and readiness probes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::pipeline::ScrapePipeline;

/// Shared state for HTTP handlers.
pub struct HttpState {
    pub pipeline: ScrapePipeline,
}

/// Create the HTTP router.
pub fn create_router(pipeline: ScrapePipeline) -> Router {
    let state = Arc::new(HttpState { pipeline });

    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/api/scholar", get(handle_scholar))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "scholar-profile",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn readiness_check(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ready",
        "service": "scholar-profile",
        "version": env!("CARGO_PKG_VERSION"),
        "activeSessions": state.pipeline.renderer().active_sessions(),
    }))
}

/// Scrape the configured profile. One render per request, no caching.
async fn handle_scholar(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    tracing::debug!(url = %state.pipeline.profile_url(), "Handling scrape request");

    let response = state.pipeline.respond().await;
    let status =
        if response.is_error() { StatusCode::INTERNAL_SERVER_ERROR } else { StatusCode::OK };

    (status, Json(response))
}
