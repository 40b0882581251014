//! Configuration resolution
//!
//! Defaults come from an optional `lookout.toml`; command-line flags
//! override file values. The token is never read from the file — it
//! arrives from the `--token` flag or the `VERCEL_TOKEN` environment
//! variable.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::vercel::events::{DEFAULT_PATTERNS, DEFAULT_TAIL};

/// Base URL of the Vercel REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.vercel.com";

/// Request timeout applied when nothing overrides it.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Optional defaults parsed from `lookout.toml`.
///
/// Every field is optional; anything missing falls back to the built-in
/// default unless a command-line flag overrides it first.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct FileConfig {
    /// Base URL of the Vercel API
    pub base_url: Option<String>,
    /// Number of trailing log lines to scan
    pub tail: Option<usize>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Substrings that mark a line as error-like
    pub patterns: Option<Vec<String>>,
}

impl FileConfig {
    /// Parse a `lookout.toml` file that must exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse a `lookout.toml` file, falling back to defaults when absent.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse `lookout.toml` content from a string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse lookout.toml")
    }
}

/// Command-line values that take precedence over file values.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `--base-url`
    pub base_url: Option<String>,
    /// `--tail`
    pub tail: Option<usize>,
    /// `--timeout-secs`
    pub timeout_secs: Option<u64>,
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Bearer token for the Vercel API
    pub token: String,
    /// Base URL with any trailing slash removed
    pub base_url: String,
    /// Number of trailing log lines to scan
    pub tail: usize,
    /// Timeout applied to each request
    pub timeout: Duration,
    /// Case-insensitive substrings that mark a line as error-like
    pub patterns: Vec<String>,
}

impl Config {
    /// Resolve the effective configuration.
    ///
    /// Precedence per field: command-line flag, then file value, then the
    /// built-in default.
    pub fn resolve(token: String, file: &FileConfig, overrides: &Overrides) -> Result<Self> {
        let base_url = overrides
            .base_url
            .clone()
            .or_else(|| file.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let tail = overrides.tail.or(file.tail).unwrap_or(DEFAULT_TAIL);
        let timeout_secs = overrides
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let patterns = file
            .patterns
            .clone()
            .unwrap_or_else(|| DEFAULT_PATTERNS.iter().map(|p| (*p).to_string()).collect());

        let config = Self {
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
            tail,
            timeout: Duration::from_secs(timeout_secs),
            patterns,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the resolved configuration.
    fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            bail!("Token cannot be empty");
        }
        if self.base_url.is_empty() {
            bail!("Base URL cannot be empty");
        }
        if self.tail == 0 {
            bail!("Tail must be at least 1 line");
        }
        if self.timeout.is_zero() {
            bail!("Timeout must be at least 1 second");
        }
        if self.patterns.is_empty() {
            bail!("At least one error pattern is required");
        }
        for pattern in &self.patterns {
            if pattern.trim().is_empty() {
                bail!("Error patterns cannot be blank");
            }
        }
        Ok(())
    }
}
