//! Scrape pipeline tests with in-process renderers.
//!
//! Covers the success path over a saved page and every failure point of a
//! render, checking the response shape and that sessions are always released.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use scholar_profile::config::Config;
use scholar_profile::error::{RenderError, RenderResult, SCRAPE_FAILED_MESSAGE, ScrapeError};
use scholar_profile::formatters::response_json;
use scholar_profile::pipeline::{ScrapePipeline, snapshot_from_html};
use scholar_profile::renderer::{RenderSession, RenderedPage, Renderer, StaticRenderer};

const PROFILE: &str = include_str!("fixtures/profile.html");
const PROFILE_URL: &str = "https://scholar.google.com/citations?hl=en&user=2clQgooAAAAJ";

/// Where the fake renderer should fail.
#[derive(Debug, Clone, Copy)]
enum FailAt {
    Open,
    Navigation,
    Release,
    /// Navigation never completes.
    Hang,
}

struct FailingRenderer {
    fail_at: FailAt,
    active: Arc<AtomicUsize>,
    opened: AtomicUsize,
}

impl FailingRenderer {
    fn new(fail_at: FailAt) -> Self {
        Self { fail_at, active: Arc::new(AtomicUsize::new(0)), opened: AtomicUsize::new(0) }
    }
}

#[async_trait]
impl Renderer for FailingRenderer {
    async fn open_session(&self) -> RenderResult<Box<dyn RenderSession>> {
        if matches!(self.fail_at, FailAt::Open) {
            return Err(RenderError::launch("browser binary not found"));
        }
        self.opened.fetch_add(1, Ordering::Relaxed);
        self.active.fetch_add(1, Ordering::Relaxed);
        Ok(Box::new(FailingSession { fail_at: self.fail_at, active: Arc::clone(&self.active) }))
    }

    fn active_sessions(&self) -> usize {
        self.active.load(Ordering::Relaxed)
    }
}

struct FailingSession {
    fail_at: FailAt,
    active: Arc<AtomicUsize>,
}

#[async_trait]
impl RenderSession for FailingSession {
    async fn render_document(&mut self, url: &str) -> RenderResult<RenderedPage> {
        match self.fail_at {
            FailAt::Navigation => Err(RenderError::navigation(url, "net::ERR_CONNECTION_RESET")),
            FailAt::Hang => futures::future::pending().await,
            _ => Ok(RenderedPage { url: url.to_string(), html: PROFILE.to_string() }),
        }
    }

    async fn release(self: Box<Self>) -> RenderResult<()> {
        self.active.fetch_sub(1, Ordering::Relaxed);
        match self.fail_at {
            FailAt::Release => Err(RenderError::session("browser already gone")),
            _ => Ok(()),
        }
    }
}

fn pipeline(renderer: Arc<dyn Renderer>) -> ScrapePipeline {
    ScrapePipeline::new(renderer, &Config::for_testing(PROFILE_URL))
}

// =============================================================================
// Success path
// =============================================================================

#[tokio::test]
async fn test_scrape_saved_profile() {
    let renderer = Arc::new(StaticRenderer::new(PROFILE));
    let snapshot = pipeline(renderer.clone()).scrape().await.unwrap();

    assert_eq!(snapshot.publications.len(), 5);
    assert_eq!(snapshot.metrics.citations_all, "1543");
    assert_eq!(snapshot.histogram.len(), 5);
    assert_eq!(renderer.active_sessions(), 0);
}

#[tokio::test]
async fn test_success_response_shape() {
    let response = pipeline(Arc::new(StaticRenderer::new(PROFILE))).respond().await;
    assert!(!response.is_error());

    let json = serde_json::to_value(&response).unwrap();
    assert!(json.get("error").is_none());
    assert_eq!(json["results"].as_array().unwrap().len(), 5);
    assert_eq!(json["results"][0]["publicationDate"], "2023");
    assert_eq!(json["results"][2]["citationCount"], "0");
    assert_eq!(json["metrics"]["i10IndexSince2019"], "22");
    assert_eq!(json["graphData"][4], serde_json::json!({"year": "2023", "citations": "0"}));
}

#[test]
fn test_snapshot_from_html_matches_pipeline() {
    let snapshot = snapshot_from_html(PROFILE);
    assert_eq!(snapshot.publications[1].citation_count, "48");
}

#[tokio::test]
async fn test_each_request_renders_once() {
    let renderer = Arc::new(FailingRenderer::new(FailAt::Release));
    let pipeline = pipeline(renderer.clone());

    let _ = pipeline.respond().await;
    let _ = pipeline.respond().await;
    assert_eq!(renderer.opened.load(Ordering::Relaxed), 2);
}

// =============================================================================
// Failure paths
// =============================================================================

#[tokio::test]
async fn test_navigation_failure_yields_exact_error_body() {
    let renderer = Arc::new(FailingRenderer::new(FailAt::Navigation));
    let response = pipeline(renderer.clone()).respond().await;

    assert!(response.is_error());
    assert_eq!(
        response_json(&response, false).unwrap(),
        r#"{"error":"Failed to scrape Google Scholar profile"}"#
    );
    assert_eq!(renderer.active_sessions(), 0);
}

#[tokio::test]
async fn test_navigation_failure_is_render_error() {
    let renderer = Arc::new(FailingRenderer::new(FailAt::Navigation));
    let err = pipeline(renderer).scrape().await.unwrap_err();

    assert!(matches!(err, ScrapeError::Render(RenderError::Navigation { .. })));
    assert_eq!(err.to_user_message(), SCRAPE_FAILED_MESSAGE);
}

#[tokio::test]
async fn test_launch_failure_yields_error_body() {
    let renderer = Arc::new(FailingRenderer::new(FailAt::Open));
    let response = pipeline(renderer.clone()).respond().await;

    assert_eq!(response.error.as_deref(), Some(SCRAPE_FAILED_MESSAGE));
    assert!(response.results.is_none());
    assert!(response.metrics.is_none());
    assert!(response.graph_data.is_none());
    assert_eq!(renderer.opened.load(Ordering::Relaxed), 0);
}

#[tokio::test]
async fn test_release_failure_keeps_rendered_result() {
    let renderer = Arc::new(FailingRenderer::new(FailAt::Release));
    let response = pipeline(renderer.clone()).respond().await;

    assert!(!response.is_error());
    assert_eq!(response.publications().len(), 5);
    assert_eq!(renderer.active_sessions(), 0);
}

#[tokio::test]
async fn test_invalid_profile_url_never_opens_session() {
    let renderer = Arc::new(FailingRenderer::new(FailAt::Release));
    let config = Config { profile_url: "scholar profile".to_string(), ..Config::for_testing("") };
    let pipeline = ScrapePipeline::new(renderer.clone(), &config);

    assert!(pipeline.respond().await.is_error());
    assert_eq!(renderer.opened.load(Ordering::Relaxed), 0);
}

// =============================================================================
// Cancellation
// =============================================================================

#[tokio::test]
async fn test_cancelled_request_releases_session() {
    let renderer = Arc::new(FailingRenderer::new(FailAt::Hang));
    let pipeline = pipeline(renderer.clone());

    let outcome =
        tokio::time::timeout(std::time::Duration::from_millis(50), pipeline.respond()).await;
    assert!(outcome.is_err(), "render should still be pending");
    assert_eq!(renderer.opened.load(Ordering::Relaxed), 1);

    for _ in 0..100 {
        if renderer.active_sessions() == 0 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    assert_eq!(renderer.active_sessions(), 0);
}
