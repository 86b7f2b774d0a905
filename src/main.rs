use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{reload, EnvFilter, Registry};

use hncomments::config::{Config, Overrides};
use hncomments::pipeline::{self, FeedSource};

#[derive(Parser, Debug)]
#[command(
    name = "hncomments",
    about = "Republish the Hacker News RSS feed with links to the comment pages"
)]
struct Args {
    /// HTTP client timeout in seconds [default: 60]
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// File path to write the RSS feed to, or - for stdout [default: comments.rss]
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Print debug messages
    #[arg(long)]
    debug: bool,

    /// Feed to republish [default: https://news.ycombinator.com/rss]
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Read the source feed from a file instead of downloading it
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Configuration file [default: ~/.config/hncomments/config.toml]
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

type FilterHandle = reload::Handle<EnvFilter, Registry>;

fn load_config(args: &Args) -> Result<Config> {
    let config = match &args.config {
        Some(path) => Config::load_required(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => match Config::default_path() {
            Some(path) => Config::load(&path)
                .with_context(|| format!("Failed to load config file: {}", path.display()))?,
            None => Config::default(),
        },
    };

    config
        .with_overrides(Overrides {
            feed_url: args.url.clone(),
            timeout_secs: args.timeout,
            output: args.output.clone(),
            debug: args.debug,
        })
        .context("Invalid command-line options")
}

fn default_filter(debug: bool) -> EnvFilter {
    EnvFilter::new(if debug { "hncomments=debug" } else { "warn" })
}

/// Installs the subscriber before anything logs.
///
/// When `RUST_LOG` is unset the filter is reloadable, so a `debug = true`
/// found later in the config file can still raise the level.
fn init_tracing(debug: bool) -> Option<FilterHandle> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
            None
        }
        Err(_) => {
            let (filter, handle) = reload::Layer::new(default_filter(debug));
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
            Some(handle)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter_handle = init_tracing(args.debug);
    let config = load_config(&args)?;
    // debug = true in the config file raises the level after the fact
    if config.debug && !args.debug {
        if let Some(handle) = &filter_handle {
            if let Err(e) = handle.reload(default_filter(true)) {
                tracing::warn!(error = %e, "Failed to enable debug logging");
            }
        }
    }
    tracing::debug!(?config, "Starting run");

    let source = match &args.input {
        Some(path) => FeedSource::File(path.clone()),
        None => FeedSource::Remote,
    };

    let summary = pipeline::run(&config, &source)
        .await
        .context("Failed to build comment feed")?;

    tracing::debug!(
        written = summary.written_items,
        skipped = summary.skipped_items(),
        "Comment feed complete"
    );
    Ok(())
}
