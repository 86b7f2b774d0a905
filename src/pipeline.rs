//! One sequential run: source → parse → transform → write.
//!
//! Each stage completes before the next starts. Any fatal error stops the run
//! before later stages touch the output destination.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::Config;
use crate::feed::{
    build_client, fetch_feed, parse_feed, read_feed_file, transform, write_feed,
    write_feed_to_path, DiagnosticSink, FetchError, OutputFeed, ParseError, TracingSink,
    WriteError,
};

/// Fatal errors that abort a run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Failed to fetch feed: {0}")]
    Fetch(#[from] FetchError),
    #[error("Failed to parse feed: {0}")]
    Parse(#[from] ParseError),
    #[error("Failed to write feed: {0}")]
    Write(#[from] WriteError),
}

/// Where the raw feed comes from.
#[derive(Debug, Clone)]
pub enum FeedSource {
    /// Fetch `Config::feed_url` over HTTP.
    Remote,
    /// Read a feed document from disk.
    File(PathBuf),
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub source_items: usize,
    pub written_items: usize,
}

impl RunSummary {
    pub fn skipped_items(&self) -> usize {
        self.source_items - self.written_items
    }
}

/// Runs the pipeline with diagnostics going to `tracing`.
pub async fn run(config: &Config, source: &FeedSource) -> Result<RunSummary, RunError> {
    let mut sink = TracingSink::new(config.debug);
    run_with_sink(config, source, &mut sink).await
}

/// Runs the pipeline, reporting skipped items to `sink`.
pub async fn run_with_sink(
    config: &Config,
    source: &FeedSource,
    sink: &mut dyn DiagnosticSink,
) -> Result<RunSummary, RunError> {
    let bytes = match source {
        FeedSource::Remote => {
            let client = build_client(&config.user_agent, config.timeout())?;
            fetch_feed(&client, &config.feed_url, config.timeout()).await?
        }
        FeedSource::File(path) => read_feed_file(path).await?,
    };

    tracing::debug!(bytes = bytes.len(), "Parsing feed");
    let source_feed = parse_feed(&bytes)?;

    let output = transform(&source_feed, &config.copyright, sink);
    let summary = RunSummary {
        source_items: source_feed.items.len(),
        written_items: output.items.len(),
    };

    persist(config, &output)?;

    tracing::debug!(
        source_items = summary.source_items,
        written_items = summary.written_items,
        skipped = summary.skipped_items(),
        "Feed written"
    );
    Ok(summary)
}

fn persist(config: &Config, output: &OutputFeed) -> Result<(), WriteError> {
    if config.writes_to_stdout() {
        let stdout = std::io::stdout();
        write_feed(output, stdout.lock())
    } else {
        write_feed_to_path(output, &config.output)
    }
}
