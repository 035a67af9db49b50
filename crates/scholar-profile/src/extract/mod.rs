//! Structured extraction from a rendered Scholar profile.
//!
//! Every extractor is a total function over a possibly partial document:
//! a missing node resolves to `""` or `"0"` per its rule in [`rules`], never
//! to an error. The three extractors read the same immutable snapshot and are
//! independent of each other.

mod document;
pub mod rules;

pub use document::ProfileDocument;

use crate::config::profile;
use crate::models::{
    HistogramPoint, MetricsSnapshot, ProfileSnapshot, PublicationRecord, zip_by_years,
};
use rules::{RULES, text_of};

/// Extract publications, metrics and histogram from one document.
#[must_use]
pub fn extract_profile(doc: &ProfileDocument) -> ProfileSnapshot {
    let snapshot = ProfileSnapshot {
        publications: extract_publications(doc),
        metrics: extract_metrics(doc),
        histogram: extract_histogram(doc),
    };

    tracing::debug!(
        publications = snapshot.publications.len(),
        histogram_points = snapshot.histogram.len(),
        "Extracted profile"
    );

    snapshot
}

/// Extract the first publication rows in document order.
#[must_use]
pub fn extract_publications(doc: &ProfileDocument) -> Vec<PublicationRecord> {
    extract_publications_capped(doc, profile::MAX_PUBLICATIONS)
}

/// Extract at most `cap` publication rows in document order.
#[must_use]
pub fn extract_publications_capped(doc: &ProfileDocument, cap: usize) -> Vec<PublicationRecord> {
    doc.select(&RULES.row)
        .take(cap)
        .map(|row| {
            let mut record = PublicationRecord::default();
            for (rule, selector) in &RULES.fields {
                let value = rule.resolve(row, selector);
                rule.assign(&mut record, value);
            }
            record
        })
        .collect()
}

/// Extract the six statistics cells.
#[must_use]
pub fn extract_metrics(doc: &ProfileDocument) -> MetricsSnapshot {
    let cells: Vec<String> = doc.select(&RULES.metric_cell).map(text_of).collect();
    MetricsSnapshot::from_positions(&cells)
}

/// Extract the citations-per-year graph, paired by index.
#[must_use]
pub fn extract_histogram(doc: &ProfileDocument) -> Vec<HistogramPoint> {
    let years: Vec<String> = doc.select(&RULES.graph_year).map(text_of).collect();
    let bars: Vec<String> = doc.select(&RULES.graph_bar).map(text_of).collect();
    zip_by_years(years, &bars)
}
