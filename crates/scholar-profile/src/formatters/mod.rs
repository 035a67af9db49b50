//! Output formatters for the terminal presentation layer.

pub mod json;
pub mod markdown;

pub use json::{response_json, view_json};
pub use markdown::{
    format_histogram_markdown, format_metrics_markdown, format_publication_markdown,
    format_view_markdown,
};
