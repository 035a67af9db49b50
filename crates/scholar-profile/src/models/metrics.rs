//! Aggregate citation metrics from the profile statistics block.

use serde::{Deserialize, Serialize};

/// The six numbers in the profile's statistics table, as rendered text.
///
/// The "since" column is relative to the fixed cutoff year Scholar shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Total citations.
    #[serde(rename = "citationsAll")]
    pub citations_all: String,

    /// Citations since the cutoff year.
    #[serde(rename = "citationsSince2019")]
    pub citations_since: String,

    /// h-index over all time.
    #[serde(rename = "hIndexAll")]
    pub h_index_all: String,

    /// h-index since the cutoff year.
    #[serde(rename = "hIndexSince2019")]
    pub h_index_since: String,

    /// i10-index over all time.
    #[serde(rename = "i10IndexAll")]
    pub i10_index_all: String,

    /// i10-index since the cutoff year.
    #[serde(rename = "i10IndexSince2019")]
    pub i10_index_since: String,
}

impl Default for MetricsSnapshot {
    fn default() -> Self {
        Self::from_positions(&[])
    }
}

impl MetricsSnapshot {
    /// Build a snapshot from the statistics cells in document order.
    ///
    /// Positions 0 to 5 fill the fields in table order; a missing or empty
    /// cell yields `"0"`.
    #[must_use]
    pub fn from_positions(cells: &[String]) -> Self {
        let at = |i: usize| {
            cells
                .get(i)
                .filter(|s| !s.is_empty())
                .cloned()
                .unwrap_or_else(|| "0".to_string())
        };

        Self {
            citations_all: at(0),
            citations_since: at(1),
            h_index_all: at(2),
            h_index_since: at(3),
            i10_index_all: at(4),
            i10_index_since: at(5),
        }
    }

    /// Fields paired with display labels, in table order.
    #[must_use]
    pub fn labelled(&self) -> [(&'static str, &str); 6] {
        [
            ("Citations (all)", &self.citations_all),
            ("Citations (since 2019)", &self.citations_since),
            ("h-index (all)", &self.h_index_all),
            ("h-index (since 2019)", &self.h_index_since),
            ("i10-index (all)", &self.i10_index_all),
            ("i10-index (since 2019)", &self.i10_index_since),
        ]
    }
}
