//! Configuration for the Scholar profile scraper.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

/// Profile page constants.
pub mod profile {
    use std::time::Duration;

    /// Google Scholar citations endpoint.
    pub const BASE_URL: &str = "https://scholar.google.com/citations";

    /// Profile scraped when no user id is configured.
    pub const DEFAULT_USER_ID: &str = "2clQgooAAAAJ";

    /// Interface language requested from Scholar.
    pub const LANGUAGE: &str = "en";

    /// Listing view of the profile page.
    pub const VIEW: &str = "list_works";

    /// Most-recent-first ordering.
    pub const SORT_BY: &str = "pubdate";

    /// Maximum publication rows extracted per request.
    pub const MAX_PUBLICATIONS: usize = 20;

    /// Quiet period with no new network activity before the page counts as settled.
    pub const QUIESCENCE_IDLE: Duration = Duration::from_millis(500);

    /// Interval between network activity samples.
    pub const QUIESCENCE_POLL: Duration = Duration::from_millis(100);

    /// Upper bound on the settle loop. Reaching it does not fail the render.
    pub const QUIESCENCE_MAX_WAIT: Duration = Duration::from_secs(30);
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Fully built profile URL to render.
    pub profile_url: String,

    /// Chromium binary path (optional, falls back to chromiumoxide discovery).
    pub chromium_path: Option<PathBuf>,

    /// Quiet period required before the page is considered settled.
    pub quiescence_idle: Duration,

    /// Interval between network activity samples.
    pub quiescence_poll: Duration,

    /// Upper bound on the settle loop.
    pub quiescence_max_wait: Duration,
}

impl Config {
    /// Create a new configuration for the given Scholar user id.
    #[must_use]
    pub fn new(user_id: Option<String>, chromium_path: Option<PathBuf>) -> Self {
        let user_id = user_id.unwrap_or_else(|| profile::DEFAULT_USER_ID.to_string());
        Self {
            profile_url: profile_url_for(&user_id),
            chromium_path,
            quiescence_idle: profile::QUIESCENCE_IDLE,
            quiescence_poll: profile::QUIESCENCE_POLL,
            quiescence_max_wait: profile::QUIESCENCE_MAX_WAIT,
        }
    }

    /// Create a test configuration pointing at an arbitrary page.
    #[must_use]
    pub fn for_testing(profile_url: &str) -> Self {
        Self {
            profile_url: profile_url.to_string(),
            chromium_path: None,
            quiescence_idle: Duration::from_millis(0), // No settle wait in tests
            quiescence_poll: Duration::from_millis(10),
            quiescence_max_wait: Duration::from_secs(1),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// `SCHOLAR_PROFILE_URL` takes precedence over `SCHOLAR_USER_ID`.
    ///
    /// # Errors
    ///
    /// Returns error if `SCHOLAR_PROFILE_URL` is not a valid absolute URL.
    pub fn from_env() -> anyhow::Result<Self> {
        let user_id = std::env::var("SCHOLAR_USER_ID").ok();
        let chromium_path = std::env::var("CHROMIUM_PATH").ok().map(PathBuf::from);
        let mut config = Self::new(user_id, chromium_path);

        if let Ok(url) = std::env::var("SCHOLAR_PROFILE_URL") {
            config = config.with_profile_url(&url)?;
        }

        Ok(config)
    }

    /// Replace the profile URL after validating it.
    ///
    /// # Errors
    ///
    /// Returns error if `url` does not parse as an absolute URL.
    pub fn with_profile_url(mut self, url: &str) -> anyhow::Result<Self> {
        let parsed = Url::parse(url)
            .map_err(|e| anyhow::anyhow!("invalid profile URL '{url}': {e}"))?;
        self.profile_url = parsed.to_string();
        Ok(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Build the profile listing URL for a Scholar user id.
#[must_use]
pub fn profile_url_for(user_id: &str) -> String {
    // BASE_URL is a constant, so parsing cannot fail at runtime.
    let mut url = Url::parse(profile::BASE_URL).expect("valid base URL");
    url.query_pairs_mut()
        .append_pair("hl", profile::LANGUAGE)
        .append_pair("user", user_id)
        .append_pair("view_op", profile::VIEW)
        .append_pair("sortby", profile::SORT_BY);
    url.to_string()
}
