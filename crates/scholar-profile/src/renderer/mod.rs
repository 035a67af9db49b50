//! Page renderer adapter.
//!
//! A [`Renderer`] opens one [`RenderSession`] per request. The session
//! navigates, waits for the page's network activity to settle, and hands back
//! the rendered HTML. Callers must [`RenderSession::release`] the session on
//! every exit path.

mod chromium;
mod fixture;

pub use chromium::{ChromiumRenderer, ChromiumSession};
pub use fixture::StaticRenderer;

use async_trait::async_trait;

use crate::error::RenderResult;

/// Rendered page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// URL that was requested.
    pub url: String,

    /// Serialized DOM after the page settled.
    pub html: String,
}

/// A rendering engine able to open sessions.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Open a new rendering session.
    async fn open_session(&self) -> RenderResult<Box<dyn RenderSession>>;

    /// Number of sessions opened and not yet released.
    fn active_sessions(&self) -> usize;
}

/// A single rendering session (browser tab).
#[async_trait]
pub trait RenderSession: Send {
    /// Navigate to `url` and return the DOM once network activity settles.
    async fn render_document(&mut self, url: &str) -> RenderResult<RenderedPage>;

    /// Close the session and free its resources.
    async fn release(self: Box<Self>) -> RenderResult<()>;
}
