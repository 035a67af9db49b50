//! Scholar Profile Scraper - Entry Point
//!
//! Serves scrape results over HTTP, or runs one scrape from the terminal.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use scholar_profile::{
    Config, ScrapePipeline,
    formatters,
    models::{QueryState, ResponseFormat},
    renderer::{ChromiumRenderer, Renderer, StaticRenderer},
    server::{ScholarServer, browse},
    view::PublicationBrowser,
};

#[derive(Parser, Debug)]
#[command(name = "scholar-profile")]
#[command(about = "Google Scholar profile scraper")]
#[command(version)]
struct Cli {
    /// Scholar user id to scrape
    #[arg(long, global = true, env = "SCHOLAR_USER_ID")]
    user_id: Option<String>,

    /// Full profile URL (overrides --user-id)
    #[arg(long, global = true, env = "SCHOLAR_PROFILE_URL")]
    profile_url: Option<String>,

    /// Chromium binary to launch
    #[arg(long, global = true, env = "CHROMIUM_PATH")]
    chromium_path: Option<PathBuf>,

    /// Extract from a saved HTML page instead of launching a browser
    #[arg(long, global = true)]
    html_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the scrape endpoint over HTTP
    Serve {
        /// HTTP server port
        #[arg(long, default_value = "8000", env = "PORT")]
        port: u16,
    },
    /// Scrape once and print the response JSON
    Scrape {
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Scrape once and print the publications matching a query
    Search {
        /// Search text matched against title, authors and date
        #[arg(long, short, default_value = "")]
        query: String,

        /// Keep only publications from this year
        #[arg(long, short)]
        year: Option<i32>,

        /// Output format
        #[arg(long, value_enum, default_value_t = ResponseFormat::Markdown)]
        format: ResponseFormat,
    },
    /// Scrape once, then filter interactively from stdin
    Browse,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    // Logs go to stderr so command output on stdout stays clean.
    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let config = Config::new(cli.user_id.clone(), cli.chromium_path.clone());
    match &cli.profile_url {
        Some(url) => config.with_profile_url(url),
        None => Ok(config),
    }
}

fn build_renderer(cli: &Cli, config: &Config) -> anyhow::Result<Arc<dyn Renderer>> {
    let renderer: Arc<dyn Renderer> = match &cli.html_file {
        Some(path) => {
            tracing::info!(path = %path.display(), "Using saved HTML page");
            Arc::new(StaticRenderer::from_file(path)?)
        }
        None => Arc::new(ChromiumRenderer::new(config)),
    };
    Ok(renderer)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        command = ?cli.command,
        "Starting Scholar profile scraper"
    );

    let config = build_config(&cli)?;
    let renderer = build_renderer(&cli, &config)?;
    let pipeline = ScrapePipeline::new(renderer, &config);

    match cli.command {
        Command::Serve { port } => {
            tracing::info!(port, "Running in HTTP mode");
            ScholarServer::new(pipeline).run_http(port).await?;
        }
        Command::Scrape { pretty } => {
            let response = pipeline.respond().await;
            println!("{}", formatters::response_json(&response, pretty)?);
            if response.is_error() {
                std::process::exit(1);
            }
        }
        Command::Search { query, year, format } => {
            let snapshot = pipeline.scrape().await?;
            let state = QueryState::new(query, year);
            let view = scholar_profile::filter::filter(&snapshot.publications, &state);

            if format.is_json() {
                println!("{}", serde_json::to_string_pretty(&formatters::view_json(&view, &state))?);
            } else {
                println!("{}", formatters::format_view_markdown(&view, &state));
                println!("## Metrics\n\n{}", formatters::format_metrics_markdown(&snapshot.metrics));
                println!(
                    "## Citations per year\n\n{}",
                    formatters::format_histogram_markdown(&snapshot.histogram)
                );
            }
        }
        Command::Browse => {
            let response = pipeline.respond().await;
            if let Some(error) = &response.error {
                anyhow::bail!("{error}");
            }

            let mut browser = PublicationBrowser::from_response(&response);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            browse::run_browse(&mut browser, stdin, tokio::io::stdout()).await?;
        }
    }

    Ok(())
}
