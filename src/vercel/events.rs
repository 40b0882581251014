//! Event-line classification for deployment build logs
//!
//! The events endpoint returns newline-delimited text where some lines are
//! independently parseable JSON objects with an optional `text` field and
//! others are arbitrary raw output. This module decides which lines look
//! error-like and how each printable line is rendered.

use serde_json::Value;

/// Number of trailing log lines scanned by default.
pub const DEFAULT_TAIL: usize = 50;

/// Maximum characters of a raw (non-JSON) line kept for display.
pub const MAX_RAW_CHARS: usize = 200;

/// Substrings that mark a line as error-like, matched case-insensitively.
pub const DEFAULT_PATTERNS: [&str; 2] = ["error", "failed"];

/// A build-log line classified for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventLine {
    /// The `text` payload of a line that parsed as JSON.
    Text(String),
    /// A line that was not valid JSON, truncated to [`MAX_RAW_CHARS`].
    Raw(String),
}

impl EventLine {
    /// The message to print for this line.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Text(s) | Self::Raw(s) => s,
        }
    }
}

/// Case-insensitive substring filter for error-like lines.
///
/// Patterns are lowercased once at construction. Blank and whitespace-only
/// lines never match, regardless of the pattern set.
#[derive(Debug, Clone)]
pub struct ErrorFilter {
    patterns: Vec<String>,
}

impl ErrorFilter {
    /// Create a filter from the given substring patterns.
    #[must_use]
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        Self {
            patterns: patterns
                .iter()
                .map(|p| p.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Whether a line looks error-like under this filter.
    #[must_use]
    pub fn matches(&self, line: &str) -> bool {
        if line.trim().is_empty() {
            return false;
        }
        let lowered = line.to_lowercase();
        self.patterns.iter().any(|p| lowered.contains(p.as_str()))
    }
}

impl Default for ErrorFilter {
    fn default() -> Self {
        Self::new(&DEFAULT_PATTERNS)
    }
}

/// The last `n` elements of the body split on `\n`.
///
/// The split is exact: a trailing newline contributes a final empty element
/// that still consumes one slot of the window, and blank elements count
/// against `n` like any other line.
#[must_use]
pub fn tail_lines(text: &str, n: usize) -> Vec<&str> {
    let lines: Vec<&str> = text.split('\n').collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].to_vec()
}

/// Classify a single log line for printing.
///
/// Returns the JSON `text` payload when the line parses as JSON and carries
/// one (non-string payloads are rendered as compact JSON), the first
/// [`MAX_RAW_CHARS`] characters of the raw line when it does not parse, and
/// `None` for JSON lines without a `text` field — those are dropped from
/// reports.
#[must_use]
pub fn parse_line(line: &str) -> Option<EventLine> {
    match serde_json::from_str::<Value>(line) {
        Ok(value) => value.get("text").map(|text| match text {
            Value::String(s) => EventLine::Text(s.clone()),
            other => EventLine::Text(other.to_string()),
        }),
        Err(_) => Some(EventLine::Raw(truncate_chars(line, MAX_RAW_CHARS))),
    }
}

/// Take the first `max` characters of `s`.
///
/// Character-based so multibyte content can never split a code point.
fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
