//! Live scrape tests.
//!
//! Needs a local Chromium and network access. Run with
//! `cargo test --features integration`.

#![cfg(feature = "integration")]

use std::sync::Arc;

use scholar_profile::config::Config;
use scholar_profile::pipeline::ScrapePipeline;
use scholar_profile::renderer::{ChromiumRenderer, Renderer};

#[tokio::test]
async fn test_live_profile_scrape() {
    let config = Config::from_env().expect("config");
    let renderer = Arc::new(ChromiumRenderer::new(&config));
    let pipeline = ScrapePipeline::new(renderer.clone(), &config);

    let response = pipeline.respond().await;
    assert!(!response.is_error(), "scrape failed");
    assert!(response.publications().len() <= 20);
    assert!(response.publications().iter().all(|p| !p.citation_count.is_empty()));
    assert_eq!(renderer.active_sessions(), 0);
}

#[tokio::test]
async fn test_live_unreachable_host_fails_cleanly() {
    let config = Config::for_testing("http://127.0.0.1:9/");
    let renderer = Arc::new(ChromiumRenderer::new(&config));
    let pipeline = ScrapePipeline::new(renderer.clone(), &config);

    let response = pipeline.respond().await;
    assert!(response.is_error());
    assert_eq!(renderer.active_sessions(), 0);
}
