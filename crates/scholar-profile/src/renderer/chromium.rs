//! Chromium-based renderer using chromiumoxide.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::{Stream, StreamExt};
use tokio::task::JoinHandle;

use super::{RenderSession, RenderedPage, Renderer};
use crate::config::Config;
use crate::error::{RenderError, RenderResult};

/// Ready state and number of resource entries loaded so far.
const ACTIVITY_PROBE: &str =
    "[document.readyState, performance.getEntriesByType('resource').length]";

/// Timing of the network-settle loop.
#[derive(Debug, Clone, Copy)]
struct SettleWindow {
    idle: Duration,
    poll: Duration,
    max_wait: Duration,
}

/// Launches a headless Chromium per session.
pub struct ChromiumRenderer {
    chromium_path: Option<PathBuf>,
    settle: SettleWindow,
    active_count: Arc<AtomicUsize>,
}

impl ChromiumRenderer {
    /// Create a renderer from configuration. No browser is started until a
    /// session is opened.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            chromium_path: config.chromium_path.clone(),
            settle: SettleWindow {
                idle: config.quiescence_idle,
                poll: config.quiescence_poll,
                max_wait: config.quiescence_max_wait,
            },
            active_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn browser_config(&self) -> RenderResult<BrowserConfig> {
        let mut builder = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-setuid-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions");

        if let Some(path) = &self.chromium_path {
            builder = builder.chrome_executable(path);
        }

        builder.build().map_err(|e| RenderError::launch(format!("invalid browser config: {e}")))
    }
}

impl std::fmt::Debug for ChromiumRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChromiumRenderer")
            .field("chromium_path", &self.chromium_path)
            .field("active_sessions", &self.active_sessions())
            .finish()
    }
}

#[async_trait]
impl Renderer for ChromiumRenderer {
    async fn open_session(&self) -> RenderResult<Box<dyn RenderSession>> {
        let config = self.browser_config()?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| RenderError::launch(e.to_string()))?;

        let handler = tokio::spawn(async move {
            drain_handler(&mut handler).await;
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                let _ = browser.wait().await;
                handler.abort();
                return Err(RenderError::session(format!("failed to open page: {e}")));
            }
        };

        self.active_count.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("Opened Chromium session");

        Ok(Box::new(ChromiumSession {
            browser,
            page,
            handler,
            settle: self.settle,
            active_count: Arc::clone(&self.active_count),
        }))
    }

    fn active_sessions(&self) -> usize {
        self.active_count.load(Ordering::Relaxed)
    }
}

/// Drive the CDP event loop until it ends, logging failed events.
/// Returns the number of errors seen.
async fn drain_handler<S, E>(events: &mut S) -> usize
where
    S: Stream<Item = Result<(), E>> + Unpin,
    E: std::fmt::Display,
{
    let mut errors = 0;
    while let Some(event) = events.next().await {
        if let Err(e) = event {
            errors += 1;
            tracing::warn!(error = %e, "Chromium handler error");
        }
    }
    errors
}

/// A browser process with one open page.
pub struct ChromiumSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    settle: SettleWindow,
    active_count: Arc<AtomicUsize>,
}

impl ChromiumSession {
    async fn probe(&self) -> RenderResult<(String, u64)> {
        self.page
            .evaluate(ACTIVITY_PROBE)
            .await
            .map_err(|e| RenderError::content(format!("activity probe failed: {e}")))?
            .into_value()
            .map_err(|e| RenderError::content(format!("activity probe returned {e:?}")))
    }

    /// Wait until the document is complete and no new resources have loaded
    /// for the idle window. Hitting `max_wait` proceeds with what has loaded.
    async fn wait_for_quiescence(&self) -> RenderResult<()> {
        let start = Instant::now();
        let mut quiet_since = Instant::now();
        let mut last_count = None;

        loop {
            let (ready_state, count) = self.probe().await?;
            if last_count != Some(count) {
                last_count = Some(count);
                quiet_since = Instant::now();
            }

            if ready_state == "complete" && quiet_since.elapsed() >= self.settle.idle {
                tracing::debug!(resources = count, elapsed = ?start.elapsed(), "Page settled");
                return Ok(());
            }

            if start.elapsed() >= self.settle.max_wait {
                tracing::warn!(
                    resources = count,
                    ready_state = %ready_state,
                    "Page still active after settle limit, reading DOM as is"
                );
                return Ok(());
            }

            tokio::time::sleep(self.settle.poll).await;
        }
    }
}

#[async_trait]
impl RenderSession for ChromiumSession {
    async fn render_document(&mut self, url: &str) -> RenderResult<RenderedPage> {
        self.page.goto(url).await.map_err(|e| RenderError::navigation(url, e.to_string()))?;
        self.wait_for_quiescence().await?;

        let html = self.page.content().await.map_err(|e| RenderError::content(e.to_string()))?;

        Ok(RenderedPage { url: url.to_string(), html })
    }

    async fn release(self: Box<Self>) -> RenderResult<()> {
        let Self { mut browser, page, handler, active_count, .. } = *self;
        active_count.fetch_sub(1, Ordering::Relaxed);

        let page_closed = page.close().await;
        let browser_closed = browser.close().await;
        let _ = browser.wait().await;
        handler.abort();

        page_closed.map_err(|e| RenderError::session(format!("failed to close page: {e}")))?;
        browser_closed
            .map_err(|e| RenderError::session(format!("failed to close browser: {e}")))?;

        tracing::debug!("Released Chromium session");
        Ok(())
    }
}
