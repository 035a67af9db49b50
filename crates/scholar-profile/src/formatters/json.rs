//! JSON output formatting.

use serde_json::{Value, json};

use crate::error::ScrapeResult;
use crate::filter::FilteredView;
use crate::models::{QueryState, ScholarResponse};

/// Serialize a scrape response.
pub fn response_json(response: &ScholarResponse, pretty: bool) -> ScrapeResult<String> {
    let text = if pretty {
        serde_json::to_string_pretty(response)?
    } else {
        serde_json::to_string(response)?
    };
    Ok(text)
}

/// JSON representation of a filtered view with the query that produced it.
#[must_use]
pub fn view_json(view: &FilteredView<'_>, state: &QueryState) -> Value {
    json!({
        "query": state,
        "count": view.len(),
        "results": view.records(),
    })
}
