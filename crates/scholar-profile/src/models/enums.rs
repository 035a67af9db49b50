//! Enumeration types for output options.

use serde::{Deserialize, Serialize};

/// Output format for rendered views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Human-readable Markdown format.
    #[default]
    Markdown,
    /// Machine-readable JSON format.
    Json,
}

impl ResponseFormat {
    /// Check if this is JSON format.
    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}
