//! Shared test utilities
//!
//! Common helpers used across test modules. Only compiled in test builds.

use std::time::Duration;

use crate::config::Config;

/// Create a resolved `Config` pointed at the given base URL.
///
/// Uses a 5-second timeout and the default tail and patterns.
#[must_use]
pub fn test_config(base_url: &str) -> Config {
    Config {
        token: "test-token".to_string(),
        base_url: base_url.trim_end_matches('/').to_string(),
        tail: 50,
        timeout: Duration::from_secs(5),
        patterns: vec!["error".to_string(), "failed".to_string()],
    }
}

/// Build an events body of `n` numbered lines with no trailing newline.
#[must_use]
pub fn numbered_lines(n: usize) -> String {
    (1..=n)
        .map(|i| format!("line {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}
