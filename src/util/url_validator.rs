use thiserror::Error;
use url::Url;

/// Errors that can occur while validating the feed location.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
}

/// Validates the URL the feed is fetched from.
///
/// Only `http` and `https` are accepted. Hosts are not restricted: the feed
/// location is chosen by the operator, not read from untrusted input.
///
/// # Examples
///
/// ```
/// use hncomments::util::validate_feed_url;
///
/// let url = validate_feed_url("https://news.ycombinator.com/rss").unwrap();
/// assert_eq!(url.host_str(), Some("news.ycombinator.com"));
///
/// assert!(validate_feed_url("file:///etc/passwd").is_err());
/// ```
pub fn validate_feed_url(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str)?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }
}
