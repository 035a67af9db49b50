//! Year-by-year citation histogram.

use serde::{Deserialize, Serialize};

/// One bar of the citations-per-year graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramPoint {
    /// Year label as rendered (may be empty).
    pub year: String,

    /// Citation count for that year, `"0"` when absent.
    pub citations: String,
}

impl HistogramPoint {
    /// Create a point.
    #[must_use]
    pub fn new(year: impl Into<String>, citations: impl Into<String>) -> Self {
        Self { year: year.into(), citations: citations.into() }
    }
}

/// Pair year labels with bar values by index.
///
/// The years sequence drives the length. Extra bar values are dropped, and a
/// year without a bar value gets `"0"`.
#[must_use]
pub fn zip_by_years(years: Vec<String>, citations: &[String]) -> Vec<HistogramPoint> {
    years
        .into_iter()
        .enumerate()
        .map(|(i, year)| {
            let citations = citations
                .get(i)
                .filter(|c| !c.is_empty())
                .cloned()
                .unwrap_or_else(|| "0".to_string());
            HistogramPoint { year, citations }
        })
        .collect()
}
