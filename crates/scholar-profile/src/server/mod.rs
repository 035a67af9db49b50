//! Server and terminal front ends.
//!
//! Provides the HTTP transport that serves scrape results and the stdin
//! browser that filters a held publication list interactively.

pub mod browse;
pub mod transport;

use std::net::SocketAddr;

use crate::pipeline::ScrapePipeline;

/// HTTP server for the scrape endpoint.
pub struct ScholarServer {
    pipeline: ScrapePipeline,
}

impl ScholarServer {
    /// Create a new server.
    #[must_use]
    pub fn new(pipeline: ScrapePipeline) -> Self {
        Self { pipeline }
    }

    /// Run the server in HTTP mode.
    ///
    /// # Errors
    ///
    /// Returns error on server failure.
    pub async fn run_http(self, port: u16) -> anyhow::Result<()> {
        tracing::info!("Starting HTTP server on port {}", port);
        tracing::info!(url = %self.pipeline.profile_url(), "Serving profile");

        let router = transport::create_router(self.pipeline);
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        tracing::info!("HTTP server listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }

    /// Pipeline used by this server.
    #[must_use]
    pub const fn pipeline(&self) -> &ScrapePipeline {
        &self.pipeline
    }
}

impl std::fmt::Debug for ScholarServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScholarServer").field("pipeline", &self.pipeline).finish()
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.expect("Failed to install CTRL+C handler");
    tracing::info!("Received shutdown signal");
}
