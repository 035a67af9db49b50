//! Markdown output formatting.

use url::Url;

use crate::config::profile;
use crate::filter::FilteredView;
use crate::models::{HistogramPoint, MetricsSnapshot, PublicationRecord, QueryState};

/// Format a filtered publication list as Markdown.
#[must_use]
pub fn format_view_markdown(view: &FilteredView<'_>, state: &QueryState) -> String {
    let mut output = format!("# Publications ({} results)\n\n", view.len());

    let mut filters = Vec::new();
    if !state.search_term.is_empty() {
        filters.push(format!("**Search**: {}", state.search_term));
    }
    if let Some(year) = state.selected_year {
        filters.push(format!("**Year**: {year}"));
    }
    if !filters.is_empty() {
        output.push_str(&format!("{}\n\n", filters.join(" | ")));
    }

    if view.is_empty() {
        output.push_str("No publications found.\n");
        return output;
    }

    for (i, record) in view.iter().enumerate() {
        output.push_str(&format_publication_markdown(record, i + 1));
        output.push_str("\n---\n\n");
    }

    output
}

/// Format a single publication as Markdown.
#[must_use]
pub fn format_publication_markdown(record: &PublicationRecord, index: usize) -> String {
    let title = if record.title.is_empty() { "Untitled" } else { record.title.as_str() };
    let mut output = format!("## {index}. {title}\n\n");

    if !record.authors.is_empty() {
        output.push_str(&format!("**Authors**: {}\n\n", record.authors));
    }

    let mut meta = Vec::new();
    if !record.journal.is_empty() {
        meta.push(format!("**Journal**: {}", record.journal));
    }
    if !record.publication_date.is_empty() {
        meta.push(format!("**Publication Date**: {}", record.publication_date));
    }
    meta.push(format!("**Citations**: {}", record.citation_count));
    output.push_str(&format!("{}\n\n", meta.join(" | ")));

    if let Some(link) = absolute_link(&record.link) {
        output.push_str(&format!("**Link**: [Scholar]({link})\n"));
    }

    output
}

/// Format the statistics block as a Markdown table.
#[must_use]
pub fn format_metrics_markdown(metrics: &MetricsSnapshot) -> String {
    let mut output = String::from("| Metric | Value |\n|---|---|\n");
    for (label, value) in metrics.labelled() {
        output.push_str(&format!("| {label} | {value} |\n"));
    }
    output
}

/// Format the citations-per-year graph as a Markdown table.
#[must_use]
pub fn format_histogram_markdown(points: &[HistogramPoint]) -> String {
    if points.is_empty() {
        return "No citation history.\n".to_string();
    }

    let mut output = String::from("| Year | Citations |\n|---|---|\n");
    for point in points {
        output.push_str(&format!("| {} | {} |\n", point.year, point.citations));
    }
    output
}

/// Resolve a row link against the Scholar host. Empty links give `None`.
#[must_use]
pub fn absolute_link(link: &str) -> Option<String> {
    if link.is_empty() {
        return None;
    }
    let base = Url::parse(profile::BASE_URL).ok()?;
    base.join(link).ok().map(|u| u.to_string())
}
