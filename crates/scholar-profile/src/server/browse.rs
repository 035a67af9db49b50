//! Interactive terminal browser over a held publication list.
//!
//! Reads one command per line. Plain text replaces the search term; lines
//! starting with `:` are commands. Every change re-renders the filtered view.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::formatters;
use crate::view::PublicationBrowser;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    /// Replace the search term.
    Search(String),
    /// Select a year, or clear the selection with `None`.
    Year(Option<i32>),
    /// List the year picker options.
    Years,
    /// Reset the query.
    Clear,
    /// Show usage.
    Help,
    /// Leave the browser.
    Quit,
    /// Unrecognized command.
    Unknown(String),
}

impl BrowseCommand {
    /// Parse one input line.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(command) = line.strip_prefix(':') else {
            return Self::Search(line.to_string());
        };

        let mut parts = command.trim().splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::trim).unwrap_or_default();

        match name {
            "year" | "y" if arg.is_empty() => Self::Year(None),
            "year" | "y" => match arg.parse() {
                Ok(year) => Self::Year(Some(year)),
                Err(_) => Self::Unknown(line.to_string()),
            },
            "years" => Self::Years,
            "clear" | "c" => Self::Clear,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

const HELP: &str = "\
Type text to search titles, authors and dates.
  :year <YYYY>  filter by year      :year   clear year filter
  :years        list years          :clear  reset search
  :help         this message        :quit   exit
";

/// Drive the browser from `reader`, writing views to `writer` until EOF or `:quit`.
///
/// # Errors
///
/// Returns error on I/O failure.
pub async fn run_browse<R, W>(
    browser: &mut PublicationBrowser,
    reader: R,
    mut writer: W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    write_view(browser, &mut writer).await?;

    while let Some(line) = lines.next_line().await? {
        let command = BrowseCommand::parse(&line);
        tracing::debug!(?command, "Browse command");

        match command {
            BrowseCommand::Search(term) => browser.set_search_term(term),
            BrowseCommand::Year(year) => browser.select_year(year),
            BrowseCommand::Clear => browser.clear(),
            BrowseCommand::Years => {
                let years: Vec<String> =
                    browser.year_options().iter().map(ToString::to_string).collect();
                write_text(&mut writer, &format!("Years: {}\n", years.join(", "))).await?;
                continue;
            }
            BrowseCommand::Help => {
                write_text(&mut writer, HELP).await?;
                continue;
            }
            BrowseCommand::Quit => break,
            BrowseCommand::Unknown(text) => {
                write_text(&mut writer, &format!("Unknown command: {text} (try :help)\n")).await?;
                continue;
            }
        }

        write_view(browser, &mut writer).await?;
    }

    tracing::info!("Browse session ended");
    Ok(())
}

async fn write_view<W: AsyncWrite + Unpin>(
    browser: &PublicationBrowser,
    writer: &mut W,
) -> anyhow::Result<()> {
    let text = formatters::format_view_markdown(&browser.view(), browser.state());
    write_text(writer, &text).await
}

async fn write_text<W: AsyncWrite + Unpin>(writer: &mut W, text: &str) -> anyhow::Result<()> {
    writer.write_all(text.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}
