/// Extracts the comment-page URL embedded in an item's description markup.
///
/// The Hacker News feed writes each description as a single anchor,
/// `<a href="https://news.ycombinator.com/item?id=...">Comments</a>`, so the
/// URL is the only quoted value in the markup. Splitting on `"` must yield
/// exactly three segments and the URL is the middle one.
///
/// Returns `None` when the markup holds any other number of quote characters.
/// The extracted value is not validated as a URL.
///
/// # Examples
///
/// ```
/// use hncomments::feed::extract_comment_link;
///
/// let markup = r#"<a href="https://news.ycombinator.com/item?id=1">Comments</a>"#;
/// assert_eq!(
///     extract_comment_link(markup),
///     Some("https://news.ycombinator.com/item?id=1")
/// );
/// assert_eq!(extract_comment_link("no quotes here"), None);
/// ```
pub fn extract_comment_link(markup: &str) -> Option<&str> {
    let mut parts = markup.split('"');
    let (_, link, _) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    Some(link)
}
