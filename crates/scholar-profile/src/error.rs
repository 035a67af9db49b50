//! Error types for the Scholar profile scraper.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.
//! Field-level absence inside extraction is never an error; only the renderer
//! and the pipeline boundary produce these.

/// Fixed message returned to callers on any pipeline failure.
pub const SCRAPE_FAILED_MESSAGE: &str = "Failed to scrape Google Scholar profile";

/// Errors from the page renderer layer.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// Browser process could not be launched.
    #[error("Browser launch failed: {0}")]
    Launch(String),

    /// A rendering session (tab) could not be opened or closed.
    #[error("Session error: {0}")]
    Session(String),

    /// Navigation to the target URL failed.
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// Target URL
        url: String,
        /// Underlying failure
        message: String,
    },

    /// Rendered content could not be read back.
    #[error("Failed to read page content: {0}")]
    Content(String),

    /// No renderer available in this environment.
    #[error("Renderer unavailable: {0}")]
    Unavailable(String),
}

impl RenderError {
    /// Create a launch error.
    #[must_use]
    pub fn launch(message: impl Into<String>) -> Self {
        Self::Launch(message.into())
    }

    /// Create a session error.
    #[must_use]
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session(message.into())
    }

    /// Create a navigation error.
    #[must_use]
    pub fn navigation(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Navigation { url: url.into(), message: message.into() }
    }

    /// Create a content error.
    #[must_use]
    pub fn content(message: impl Into<String>) -> Self {
        Self::Content(message.into())
    }

    /// Create an unavailable error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// Errors from the scrape pipeline.
#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    /// Error from the renderer
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScrapeError {
    /// Create a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Convert to the user-facing message. Every pipeline failure maps to the same text.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        SCRAPE_FAILED_MESSAGE.to_string()
    }
}

/// Result type alias for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Result type alias for pipeline operations.
pub type ScrapeResult<T> = Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        let err = RenderError::navigation("https://example.org", "net::ERR_NAME_NOT_RESOLVED");
        let text = err.to_string();
        assert!(text.contains("https://example.org"));
        assert!(text.contains("ERR_NAME_NOT_RESOLVED"));
    }

    #[test]
    fn test_scrape_error_from_render() {
        let err: ScrapeError = RenderError::launch("no chrome").into();
        assert!(matches!(err, ScrapeError::Render(RenderError::Launch(_))));
    }

    #[test]
    fn test_user_message_is_fixed() {
        let errors = [
            ScrapeError::from(RenderError::session("tab crashed")),
            ScrapeError::config("bad url"),
        ];
        for err in &errors {
            assert_eq!(err.to_user_message(), SCRAPE_FAILED_MESSAGE);
        }
    }
}
