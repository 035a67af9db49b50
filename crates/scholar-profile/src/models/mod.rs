//! Data models for extracted profile data and filter state.
//!
//! All models use `camelCase` on the wire to match the JSON consumed by the
//! presentation layer.

mod enums;
mod histogram;
mod metrics;
mod publication;
mod query;
mod response;

pub use enums::ResponseFormat;
pub use histogram::{HistogramPoint, zip_by_years};
pub use metrics::MetricsSnapshot;
pub use publication::{PublicationRecord, parse_year};
pub use query::QueryState;
pub use response::{ProfileSnapshot, ScholarResponse};
