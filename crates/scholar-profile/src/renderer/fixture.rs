//! Renderer serving fixed HTML, for saved pages and offline runs.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{RenderSession, RenderedPage, Renderer};
use crate::error::RenderResult;

/// Renderer whose sessions always return the same HTML.
#[derive(Debug, Clone)]
pub struct StaticRenderer {
    html: Arc<str>,
    active: Arc<AtomicUsize>,
}

impl StaticRenderer {
    /// Serve `html` for every URL.
    #[must_use]
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: Arc::from(html.into()), active: Arc::new(AtomicUsize::new(0)) }
    }

    /// Serve the contents of a saved page.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        Ok(Self::new(std::fs::read_to_string(path)?))
    }
}

#[async_trait]
impl Renderer for StaticRenderer {
    async fn open_session(&self) -> RenderResult<Box<dyn RenderSession>> {
        self.active.fetch_add(1, Ordering::Relaxed);
        Ok(Box::new(StaticSession { html: Arc::clone(&self.html), active: Arc::clone(&self.active) }))
    }

    fn active_sessions(&self) -> usize {
        self.active.load(Ordering::Relaxed)
    }
}

struct StaticSession {
    html: Arc<str>,
    active: Arc<AtomicUsize>,
}

#[async_trait]
impl RenderSession for StaticSession {
    async fn render_document(&mut self, url: &str) -> RenderResult<RenderedPage> {
        Ok(RenderedPage { url: url.to_string(), html: self.html.to_string() })
    }

    async fn release(self: Box<Self>) -> RenderResult<()> {
        self.active.fetch_sub(1, Ordering::Relaxed);
        Ok(())
    }
}
