//! Scholar Profile Scraper
//!
//! Renders a Google Scholar profile in headless Chromium, extracts the
//! publication list, citation metrics and citations-per-year histogram, and
//! filters the publication list by search text and year.
//!
//! # Features
//!
//! - **Rule-based extraction**: every positional assumption about the markup
//!   is one entry in [`extract::rules`]; missing nodes resolve to defaults
//! - **Pure filtering**: [`filter::filter`] recomputes a view from an
//!   immutable [`models::QueryState`]
//! - **Single attempt**: one render session per request, always released
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use scholar_profile::{Config, ScrapePipeline, renderer::ChromiumRenderer};
//! use scholar_profile::{filter, models::QueryState};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let pipeline = ScrapePipeline::new(Arc::new(ChromiumRenderer::new(&config)), &config);
//!
//!     let snapshot = pipeline.scrape().await?;
//!     let view = filter::filter(&snapshot.publications, &QueryState::new("graph", Some(2021)));
//!     println!("{} matching publications", view.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod filter;
pub mod formatters;
pub mod models;
pub mod pipeline;
pub mod renderer;
pub mod server;
pub mod view;

pub use config::Config;
pub use error::{RenderError, ScrapeError};
pub use pipeline::ScrapePipeline;
