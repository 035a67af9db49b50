//! Scrape pipeline: render once, release, extract.
//!
//! One attempt per request. Any renderer failure is caught here, logged, and
//! turned into the fixed error response; partial results are never returned.

use std::sync::Arc;

use url::Url;

use crate::config::Config;
use crate::error::{RenderError, RenderResult, ScrapeError, ScrapeResult};
use crate::extract::{ProfileDocument, extract_profile};
use crate::models::{ProfileSnapshot, ScholarResponse};
use crate::renderer::{RenderSession, RenderedPage, Renderer};

/// Runs the render and extraction steps for a profile URL.
#[derive(Clone)]
pub struct ScrapePipeline {
    renderer: Arc<dyn Renderer>,
    profile_url: String,
}

impl ScrapePipeline {
    /// Create a pipeline over a renderer.
    #[must_use]
    pub fn new(renderer: Arc<dyn Renderer>, config: &Config) -> Self {
        Self { renderer, profile_url: config.profile_url.clone() }
    }

    /// Profile URL this pipeline renders.
    #[must_use]
    pub fn profile_url(&self) -> &str {
        &self.profile_url
    }

    /// Renderer backing this pipeline.
    #[must_use]
    pub fn renderer(&self) -> &Arc<dyn Renderer> {
        &self.renderer
    }

    /// Render the profile and extract all three views.
    ///
    /// # Errors
    ///
    /// Returns error if the URL is invalid or the renderer fails to open,
    /// navigate, or read the page.
    pub async fn scrape(&self) -> ScrapeResult<ProfileSnapshot> {
        Url::parse(&self.profile_url)
            .map_err(|e| ScrapeError::config(format!("invalid profile URL: {e}")))?;

        let page = self.render().await?;
        tracing::debug!(url = %page.url, bytes = page.html.len(), "Rendered profile page");

        Ok(snapshot_from_html(&page.html))
    }

    /// Run the pipeline and convert the outcome into a response body.
    pub async fn respond(&self) -> ScholarResponse {
        match self.scrape().await {
            Ok(snapshot) => {
                tracing::info!(
                    publications = snapshot.publications.len(),
                    graph_points = snapshot.histogram.len(),
                    "Scraped profile"
                );
                ScholarResponse::success(snapshot)
            }
            Err(e) => {
                tracing::error!(error = %e, url = %self.profile_url, "Error scraping Google Scholar profile");
                ScholarResponse::failure()
            }
        }
    }

    /// Acquire a session, render, and release it whatever the outcome.
    ///
    /// If this future is dropped mid-render, the guard hands the session to
    /// a background release task.
    async fn render(&self) -> ScrapeResult<RenderedPage> {
        let mut guard = SessionGuard::new(self.renderer.open_session().await?);
        let rendered = guard.render_document(&self.profile_url).await;
        guard.release().await;

        Ok(rendered?)
    }
}

/// Open render session that is released exactly once, even on cancellation.
struct SessionGuard {
    session: Option<Box<dyn RenderSession>>,
}

impl SessionGuard {
    fn new(session: Box<dyn RenderSession>) -> Self {
        Self { session: Some(session) }
    }

    async fn render_document(&mut self, url: &str) -> RenderResult<RenderedPage> {
        match self.session.as_mut() {
            Some(session) => session.render_document(url).await,
            None => Err(RenderError::unavailable("render session already released")),
        }
    }

    async fn release(mut self) {
        if let Some(session) = self.session.take() {
            release_session(session).await;
        }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                tracing::warn!("Render cancelled, releasing session in background");
                handle.spawn(release_session(session));
            }
            Err(_) => tracing::warn!("Render cancelled outside a runtime, session not released"),
        }
    }
}

async fn release_session(session: Box<dyn RenderSession>) {
    if let Err(e) = session.release().await {
        tracing::warn!(error = %e, "Failed to release render session");
    }
}

impl std::fmt::Debug for ScrapePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrapePipeline")
            .field("profile_url", &self.profile_url)
            .field("active_sessions", &self.renderer.active_sessions())
            .finish()
    }
}

/// Parse rendered HTML and extract a snapshot.
///
/// Synchronous on purpose: the parsed document is not `Send` and must not
/// live across an `.await`.
#[must_use]
pub fn snapshot_from_html(html: &str) -> ProfileSnapshot {
    let doc = ProfileDocument::parse(html);
    extract_profile(&doc)
}
