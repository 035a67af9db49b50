//! Extraction payload and the JSON response returned to callers.

use serde::{Deserialize, Serialize};

use super::{HistogramPoint, MetricsSnapshot, PublicationRecord};
use crate::error::SCRAPE_FAILED_MESSAGE;

/// Everything extracted from one rendered profile page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileSnapshot {
    /// Publication rows in page order, capped.
    pub publications: Vec<PublicationRecord>,

    /// Statistics block.
    pub metrics: MetricsSnapshot,

    /// Citations-per-year graph.
    pub histogram: Vec<HistogramPoint>,
}

/// Response body of the scrape endpoint.
///
/// On success the three data fields are present and `error` is omitted; on
/// failure only `error` is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScholarResponse {
    /// Publication rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<PublicationRecord>>,

    /// Statistics block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsSnapshot>,

    /// Citations-per-year graph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_data: Option<Vec<HistogramPoint>>,

    /// Failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScholarResponse {
    /// Successful response carrying a full snapshot.
    #[must_use]
    pub fn success(snapshot: ProfileSnapshot) -> Self {
        Self {
            results: Some(snapshot.publications),
            metrics: Some(snapshot.metrics),
            graph_data: Some(snapshot.histogram),
            error: None,
        }
    }

    /// Failure response with the fixed scrape error message.
    #[must_use]
    pub fn failure() -> Self {
        Self { error: Some(SCRAPE_FAILED_MESSAGE.to_string()), ..Default::default() }
    }

    /// Check whether this response reports a failure.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Publication list held by a presentation layer; empty when absent.
    #[must_use]
    pub fn publications(&self) -> &[PublicationRecord] {
        self.results.as_deref().unwrap_or_default()
    }
}
