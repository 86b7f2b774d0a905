//! Configuration file parser for ~/.config/hncomments/config.toml.
//!
//! The config file is optional: a missing file yields `Config::default()`.
//! Unknown keys are accepted by serde, though we log a warning when the file
//! contains potential typos. Command-line flags are layered on top with
//! [`Config::with_overrides`].
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::util::validate_feed_url;

pub const DEFAULT_FEED_URL: &str = "https://news.ycombinator.com/rss";
pub const DEFAULT_USER_AGENT: &str = "HNcomments/0.1";
pub const DEFAULT_OUTPUT: &str = "comments.rss";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_COPYRIGHT: &str =
    "Copyright © 2005–2018 Y Combinator, LLC. All rights reserved.";

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),

    /// A value parsed but cannot be used.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Settings for one run of the pipeline.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
/// Missing keys fall back to `Default::default()`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Location of the source feed.
    pub feed_url: String,

    /// HTTP client timeout in seconds.
    pub timeout_secs: u64,

    /// File path the RSS feed is written to. `-` writes to stdout.
    pub output: PathBuf,

    /// Emit debug messages, including one per skipped item.
    pub debug: bool,

    /// User-Agent header sent with the feed request.
    pub user_agent: String,

    /// Copyright notice placed on the republished feed.
    pub copyright: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            output: PathBuf::from(DEFAULT_OUTPUT),
            debug: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            copyright: DEFAULT_COPYRIGHT.to_string(),
        }
    }
}

/// Values given on the command line; `None` keeps the configured value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub feed_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub output: Option<PathBuf>,
    pub debug: bool,
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 6] = [
        "feed_url",
        "timeout_secs",
        "output",
        "debug",
        "user_agent",
        "copyright",
    ];

    /// Default config file location, `$HOME/.config/hncomments/config.toml`.
    ///
    /// Returns `None` when `HOME` is not set.
    pub fn default_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME")?;
        Some(
            PathBuf::from(home)
                .join(".config")
                .join("hncomments")
                .join("config.toml"),
        )
    }

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → silently accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        let config = Self::from_toml(&content)?;
        tracing::info!(path = %path.display(), feed_url = %config.feed_url, "Loaded configuration");
        Ok(config)
    }

    /// Load from an explicitly requested file, which must exist.
    pub fn load_required(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )));
        }
        Self::load(path)
    }

    /// Parse configuration from TOML text and validate it.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        for key in Self::unknown_keys(content) {
            tracing::warn!(key = %key, "Unknown key in config file, ignoring");
        }

        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Top-level keys in `content` that no config field reads.
    ///
    /// Returns nothing for text that is not a valid TOML table; the parse
    /// error is reported by [`Config::from_toml`] instead.
    pub fn unknown_keys(content: &str) -> Vec<String> {
        content
            .parse::<toml::Table>()
            .map(|raw| {
                raw.keys()
                    .filter(|key| !Self::KNOWN_KEYS.contains(&key.as_str()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Apply command-line values on top of this configuration.
    pub fn with_overrides(mut self, overrides: Overrides) -> Result<Self, ConfigError> {
        if let Some(url) = overrides.feed_url {
            self.feed_url = url;
        }
        if let Some(secs) = overrides.timeout_secs {
            self.timeout_secs = secs;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        self.debug |= overrides.debug;
        self.validate()?;
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// True when the output path designates standard output.
    pub fn writes_to_stdout(&self) -> bool {
        self.output.as_os_str() == "-"
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        validate_feed_url(&self.feed_url)
            .map_err(|e| ConfigError::Invalid(format!("feed_url: {}", e)))?;
        if self.output.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("output must not be empty".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
