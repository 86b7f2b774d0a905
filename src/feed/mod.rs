//! Feed handling for the comment-feed pipeline.
//!
//! - [`fetcher`] - Retrieves raw feed bytes over HTTP (or from a local file)
//! - [`parser`] - Parses RSS/Atom bytes into a [`SourceFeed`] using `feed-rs`
//! - [`extract`] - Pulls the comment-page URL out of an item's description
//! - [`transform`] - Rebuilds the feed around the extracted comment links
//! - [`writer`] - Renders the result as RSS 2.0 and persists it
//!
//! # Example
//!
//! ```ignore
//! use crate::feed::{fetch_feed, parse_feed, transform, write_feed_to_path, TracingSink};
//!
//! let bytes = fetch_feed(&client, url, timeout).await?;
//! let source = parse_feed(&bytes)?;
//! let output = transform(&source, copyright, &mut TracingSink::new(true));
//! write_feed_to_path(&output, Path::new("comments.rss"))?;
//! ```

mod extract;
mod fetcher;
mod parser;
mod transform;
mod writer;

pub use extract::extract_comment_link;
pub use fetcher::{build_client, fetch_feed, read_feed_file, FetchError};
pub use parser::{parse_feed, ParseError, SourceFeed, SourceFeedItem};
pub use transform::{
    transform, transform_at, Diagnostic, DiagnosticSink, OutputFeed, OutputFeedItem, SkipReason,
    TracingSink,
};
pub use writer::{render_rss, write_feed, write_feed_to_path, WriteError};
