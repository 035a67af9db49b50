//! HTTP transport tests.
//!
//! Drives the axum router in-process with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use scholar_profile::config::Config;
use scholar_profile::pipeline::ScrapePipeline;
use scholar_profile::renderer::{Renderer, StaticRenderer};
use scholar_profile::server::transport::create_router;
use tower::ServiceExt;

const PROFILE: &str = include_str!("fixtures/profile.html");

fn router_for(renderer: Arc<dyn Renderer>, url: &str) -> axum::Router {
    create_router(ScrapePipeline::new(renderer, &Config::for_testing(url)))
}

async fn get_json(router: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response =
        router.oneshot(Request::get(uri).body(Body::empty()).unwrap()).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health_endpoint() {
    let router = router_for(Arc::new(StaticRenderer::new("")), "https://example.org/");
    let (status, json) = get_json(router, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "scholar-profile");
}

#[tokio::test]
async fn test_ready_reports_no_open_sessions() {
    let router = router_for(Arc::new(StaticRenderer::new("")), "https://example.org/");
    let (status, json) = get_json(router, "/ready").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["activeSessions"], 0);
}

#[tokio::test]
async fn test_scholar_endpoint_success() {
    let router = router_for(Arc::new(StaticRenderer::new(PROFILE)), "https://example.org/");
    let (status, json) = get_json(router, "/api/scholar").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["results"][0]["title"], "Graph Neural Networks for Citation Prediction");
    assert_eq!(json["metrics"]["citationsAll"], "1543");
    assert_eq!(json["graphData"].as_array().unwrap().len(), 5);
    assert!(json.get("error").is_none());
}

#[tokio::test]
async fn test_scholar_endpoint_failure_is_500() {
    let router = router_for(Arc::new(StaticRenderer::new(PROFILE)), "not a url");
    let (status, json) = get_json(router, "/api/scholar").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, serde_json::json!({"error": "Failed to scrape Google Scholar profile"}));
}

#[tokio::test]
async fn test_scholar_endpoint_ignores_query_string() {
    let router = router_for(Arc::new(StaticRenderer::new(PROFILE)), "https://example.org/");
    let (status, json) = get_json(router, "/api/scholar?user=someoneelse").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["results"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let router = router_for(Arc::new(StaticRenderer::new("")), "https://example.org/");
    let response =
        router.oneshot(Request::get("/api/other").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
