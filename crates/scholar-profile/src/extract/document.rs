//! Queryable document built from rendered page HTML.

use scraper::{ElementRef, Html, Selector};

/// Parsed snapshot of a rendered page.
///
/// Not `Send`: build it after the rendering session has been released and
/// keep it out of `.await` points.
pub struct ProfileDocument {
    html: Html,
}

impl ProfileDocument {
    /// Parse rendered HTML. Malformed markup is recovered, never rejected.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// All nodes matching `selector` in document order.
    pub fn select<'a>(&'a self, selector: &'a Selector) -> impl Iterator<Item = ElementRef<'a>> {
        self.html.select(selector)
    }
}

impl std::fmt::Debug for ProfileDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileDocument").finish_non_exhaustive()
    }
}
