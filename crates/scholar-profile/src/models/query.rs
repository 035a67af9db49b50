//! Query state driving the publication filter.

use serde::{Deserialize, Serialize};

/// Search text and optional year selection.
///
/// Treated as an immutable value: every change produces a new state, which
/// the caller passes to [`crate::filter::filter`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryState {
    /// Free-text term matched against title, authors and date.
    #[serde(default)]
    pub search_term: String,

    /// Exact publication year to keep.
    #[serde(default)]
    pub selected_year: Option<i32>,
}

impl QueryState {
    /// Create a state from its parts.
    #[must_use]
    pub fn new(search_term: impl Into<String>, selected_year: Option<i32>) -> Self {
        Self { search_term: search_term.into(), selected_year }
    }

    /// Same state with a different search term.
    #[must_use]
    pub fn with_search_term(&self, term: impl Into<String>) -> Self {
        Self { search_term: term.into(), selected_year: self.selected_year }
    }

    /// Same state with a different year selection.
    #[must_use]
    pub fn with_selected_year(&self, year: Option<i32>) -> Self {
        Self { search_term: self.search_term.clone(), selected_year: year }
    }

    /// Same state with the year taken from a year-picker value.
    ///
    /// The blank "all years" option, `"0"` and anything non-numeric clear the
    /// selection.
    #[must_use]
    pub fn with_year_option(&self, value: &str) -> Self {
        let year = value.trim().parse::<i32>().ok().filter(|y| *y != 0);
        self.with_selected_year(year)
    }

    /// True when neither a term nor a year is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty() && self.selected_year.is_none()
    }
}
