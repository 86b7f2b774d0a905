//! Rebuilds a source feed so that every item links to its comment page.
//!
//! The transformation is a stable filter+map over the source items. Items that
//! cannot be converted are dropped and reported to a [`DiagnosticSink`]; the
//! transformation as a whole never fails.

use chrono::{DateTime, Utc};

use crate::feed::extract::extract_comment_link;
use crate::feed::parser::{SourceFeed, SourceFeedItem};

/// The republished feed handed to the writer.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputFeed {
    pub title: String,
    pub link: String,
    pub description: String,
    pub copyright: String,
    /// Time the feed was built, not derived from the source.
    pub generated_at: DateTime<Utc>,
    pub items: Vec<OutputFeedItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputFeedItem {
    pub title: String,
    pub comment_link: String,
    pub created_at: DateTime<Utc>,
    /// `Submitted link: <article link>`
    pub body: String,
}

/// Why a source item produced no output item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The description did not contain exactly one quoted value.
    MissingCommentLink,
    /// The item had no usable published or updated time.
    MissingTimestamp,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingCommentLink => write!(f, "no comment link in description"),
            SkipReason::MissingTimestamp => write!(f, "no publish timestamp"),
        }
    }
}

/// A per-item diagnostic raised while transforming.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Index of the item in the source feed.
    pub index: usize,
    pub title: String,
    pub description_markup: String,
    pub reason: SkipReason,
}

/// Receives per-item diagnostics from [`transform`].
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Forwards diagnostics to `tracing` when debug output is enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink {
    pub enabled: bool,
}

impl TracingSink {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        if !self.enabled {
            return;
        }
        tracing::debug!(
            index = diagnostic.index,
            title = %diagnostic.title,
            description = %diagnostic.description_markup,
            reason = %diagnostic.reason,
            "Skipping feed item"
        );
    }
}

/// Builds the comment feed, stamping it with the current time.
pub fn transform(
    source: &SourceFeed,
    copyright: &str,
    sink: &mut dyn DiagnosticSink,
) -> OutputFeed {
    transform_at(source, Utc::now(), copyright, sink)
}

/// Builds the comment feed with an explicit generation time.
///
/// Feed metadata is copied verbatim. Each source item becomes one output item
/// whose link is the extracted comment URL; items without a comment link or
/// without a timestamp are skipped and reported to `sink`. Output order
/// follows source order.
pub fn transform_at(
    source: &SourceFeed,
    generated_at: DateTime<Utc>,
    copyright: &str,
    sink: &mut dyn DiagnosticSink,
) -> OutputFeed {
    let items = source
        .items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match convert_item(item) {
            Ok(converted) => Some(converted),
            Err(reason) => {
                sink.emit(Diagnostic {
                    index,
                    title: item.title.clone(),
                    description_markup: item.description_markup.clone(),
                    reason,
                });
                None
            }
        })
        .collect();

    OutputFeed {
        title: source.title.clone(),
        link: source.link.clone(),
        description: source.description.clone(),
        copyright: copyright.to_string(),
        generated_at,
        items,
    }
}

fn convert_item(item: &SourceFeedItem) -> Result<OutputFeedItem, SkipReason> {
    let comment_link =
        extract_comment_link(&item.description_markup).ok_or(SkipReason::MissingCommentLink)?;
    let created_at = item.published_at.ok_or(SkipReason::MissingTimestamp)?;

    Ok(OutputFeedItem {
        title: item.title.clone(),
        comment_link: comment_link.to_string(),
        created_at,
        body: format!(
            "Submitted link: {}",
            item.article_link.as_deref().unwrap_or_default()
        ),
    })
}
