//! Small helpers shared by the configuration and output layers.
//!
//! - **Path cleaning**: lexical normalization of the output path before writing
//! - **URL validation**: scheme check for the configured feed location

mod path;
mod url_validator;

pub use path::clean_path;
pub use url_validator::{validate_feed_url, UrlValidationError};
