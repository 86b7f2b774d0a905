//! Republishes a syndication feed so each item links to its discussion page.
//!
//! The default source is the Hacker News front-page RSS feed, whose item
//! descriptions embed the comment-page URL as the only quoted value. The
//! [`pipeline`] fetches the feed, rewrites each item's link to that URL and
//! writes a new RSS 2.0 document.

pub mod config;
pub mod feed;
pub mod pipeline;
pub mod util;
