//! Presentation-side state: the held publication list plus the current query.

use crate::filter::{self, FilteredView};
use crate::models::{PublicationRecord, QueryState, ScholarResponse};

/// Holds the list fetched once on load and the user's current query.
///
/// Every setter replaces the query with a new value; [`Self::view`]
/// recomputes the filtered list from scratch.
#[derive(Debug, Clone, Default)]
pub struct PublicationBrowser {
    source: Vec<PublicationRecord>,
    state: QueryState,
}

impl PublicationBrowser {
    /// Start browsing a list with an empty query.
    #[must_use]
    pub fn new(source: Vec<PublicationRecord>) -> Self {
        Self { source, state: QueryState::default() }
    }

    /// Start browsing the publications of a scrape response.
    #[must_use]
    pub fn from_response(response: &ScholarResponse) -> Self {
        Self::new(response.publications().to_vec())
    }

    /// Current query.
    #[must_use]
    pub const fn state(&self) -> &QueryState {
        &self.state
    }

    /// Full, unfiltered list.
    #[must_use]
    pub fn source(&self) -> &[PublicationRecord] {
        &self.source
    }

    /// Change the search text.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.state = self.state.with_search_term(term);
    }

    /// Change the year selection.
    pub fn select_year(&mut self, year: Option<i32>) {
        self.state = self.state.with_selected_year(year);
    }

    /// Reset the query.
    pub fn clear(&mut self) {
        self.state = QueryState::default();
    }

    /// Filtered view for the current query.
    #[must_use]
    pub fn view(&self) -> FilteredView<'_> {
        filter::filter(&self.source, &self.state)
    }

    /// Year picker options over the full list.
    #[must_use]
    pub fn year_options(&self) -> Vec<i32> {
        filter::year_options(&self.source)
    }
}
