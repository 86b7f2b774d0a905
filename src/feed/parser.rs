use chrono::{DateTime, Utc};
use thiserror::Error;

/// The feed bytes could not be parsed as RSS, Atom or JSON Feed.
#[derive(Debug, Error)]
#[error("Parse error: {0}")]
pub struct ParseError(#[from] feed_rs::parser::ParseFeedError);

/// A feed as read from the source, before any transformation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceFeed {
    pub title: String,
    pub link: String,
    pub description: String,
    /// Entries in document order.
    pub items: Vec<SourceFeedItem>,
}

/// One entry of the source feed.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFeedItem {
    pub title: String,
    /// Link to the submitted article, if the entry carried one.
    pub article_link: Option<String>,
    /// Raw description markup, unescaped by the XML layer but otherwise untouched.
    pub description_markup: String,
    /// Published time, falling back to the updated time; `None` if neither parsed.
    pub published_at: Option<DateTime<Utc>>,
}

/// Parses raw feed bytes into a [`SourceFeed`].
///
/// Unknown elements are ignored. Any structural failure is returned as a
/// [`ParseError`]; no partial feed is produced.
pub fn parse_feed(bytes: &[u8]) -> Result<SourceFeed, ParseError> {
    let feed = feed_rs::parser::parse(bytes)?;

    let items = feed
        .entries
        .into_iter()
        .map(|entry| {
            let article_link = entry.links.first().map(|l| l.href.clone());
            let published_at = entry.published.or(entry.updated);
            let description_markup = entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body))
                .unwrap_or_default();
            let title = entry
                .title
                .map(|t| t.content)
                .unwrap_or_else(|| "Untitled".to_string());

            SourceFeedItem {
                title,
                article_link,
                description_markup,
                published_at,
            }
        })
        .collect();

    Ok(SourceFeed {
        title: feed.title.map(|t| t.content).unwrap_or_default(),
        link: feed
            .links
            .into_iter()
            .next()
            .map(|l| l.href)
            .unwrap_or_default(),
        description: feed.description.map(|d| d.content).unwrap_or_default(),
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const HN_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel>
    <title>Hacker News</title>
    <link>https://news.ycombinator.com/</link>
    <description>Links for the intellectually curious, ranked by readers.</description>
    <item>
        <title>First story</title>
        <link>https://example.com/first</link>
        <pubDate>Mon, 19 Oct 2026 12:00:00 +0000</pubDate>
        <comments>https://news.ycombinator.com/item?id=1</comments>
        <description><![CDATA[<a href="https://news.ycombinator.com/item?id=1">Comments</a>]]></description>
    </item>
    <item>
        <title>Second story</title>
        <link>https://example.com/second</link>
        <pubDate>Mon, 19 Oct 2026 11:30:00 +0200</pubDate>
        <description><![CDATA[<a href="https://news.ycombinator.com/item?id=2">Comments</a>]]></description>
    </item>
</channel></rss>"#;

    #[test]
    fn test_parse_channel_metadata() {
        let feed = parse_feed(HN_RSS.as_bytes()).unwrap();
        assert_eq!(feed.title, "Hacker News");
        assert!(feed.link.starts_with("https://news.ycombinator.com"));
        assert_eq!(
            feed.description,
            "Links for the intellectually curious, ranked by readers."
        );
    }

    #[test]
    fn test_parse_items_in_order() {
        let feed = parse_feed(HN_RSS.as_bytes()).unwrap();
        assert_eq!(feed.items.len(), 2);
        assert_eq!(feed.items[0].title, "First story");
        assert_eq!(feed.items[1].title, "Second story");
        assert_eq!(
            feed.items[0].article_link.as_deref(),
            Some("https://example.com/first")
        );
        assert_eq!(
            feed.items[0].description_markup,
            r#"<a href="https://news.ycombinator.com/item?id=1">Comments</a>"#
        );
    }

    #[test]
    fn test_published_normalized_to_utc() {
        let feed = parse_feed(HN_RSS.as_bytes()).unwrap();
        assert_eq!(
            feed.items[0].published_at,
            Some(Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap())
        );
        assert_eq!(
            feed.items[1].published_at,
            Some(Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_missing_fields_use_fallbacks() {
        let rss = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
    <item><guid>1</guid></item>
</channel></rss>"#;

        let feed = parse_feed(rss.as_bytes()).unwrap();
        assert_eq!(feed.title, "");
        assert_eq!(feed.items.len(), 1);
        assert_eq!(feed.items[0].title, "Untitled");
        assert_eq!(feed.items[0].article_link, None);
        assert_eq!(feed.items[0].description_markup, "");
        assert_eq!(feed.items[0].published_at, None);
    }

    #[test]
    fn test_unknown_elements_tolerated() {
        let rss = r#"<?xml version="1.0"?>
<rss version="2.0" xmlns:x="urn:example"><channel>
    <title>T</title>
    <x:custom>ignored</x:custom>
    <item><title>A</title><x:score>10</x:score></item>
</channel></rss>"#;

        let feed = parse_feed(rss.as_bytes()).unwrap();
        assert_eq!(feed.items.len(), 1);
        assert_eq!(feed.items[0].title, "A");
    }

    #[test]
    fn test_atom_feed_parsed() {
        let atom = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
    <title>Atom Feed</title>
    <id>urn:feed</id>
    <updated>2026-10-19T12:00:00Z</updated>
    <entry>
        <title>Entry</title>
        <id>urn:entry:1</id>
        <link href="https://example.com/entry"/>
        <updated>2026-10-19T10:00:00Z</updated>
        <summary>See "https://example.com/discuss/1" for talk</summary>
    </entry>
</feed>"#;

        let feed = parse_feed(atom.as_bytes()).unwrap();
        assert_eq!(feed.title, "Atom Feed");
        assert_eq!(feed.items.len(), 1);
        assert_eq!(
            feed.items[0].published_at,
            Some(Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, 0).unwrap())
        );
        assert!(feed.items[0]
            .description_markup
            .contains("https://example.com/discuss/1"));
    }

    #[test]
    fn test_malformed_xml_error() {
        assert!(parse_feed(b"<not valid xml").is_err());
    }

    #[test]
    fn test_empty_channel() {
        let rss = r#"<?xml version="1.0"?>
<rss version="2.0"><channel></channel></rss>"#;
        let feed = parse_feed(rss.as_bytes()).unwrap();
        assert!(feed.items.is_empty());
    }
}
