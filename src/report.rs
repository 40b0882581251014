//! Report orchestration
//!
//! Fetches the most recent deployment, scans the tail of its build log,
//! and writes the error report. The writer is a parameter so tests can
//! capture stdout without touching process state.

use std::io::Write;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::vercel::client::{Deployment, VercelClient};
use crate::vercel::events::{parse_line, tail_lines, ErrorFilter, EventLine};

/// Header printed above the error lines.
pub const REPORT_HEADER: &str = "Recent deployment errors:";

/// Outcome of a report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The platform returned no deployments; nothing was printed.
    NoDeployments,
    /// The log of the most recent deployment was scanned.
    Completed {
        /// The deployment whose log was scanned
        deployment: Deployment,
        /// Number of tail lines considered
        scanned: usize,
        /// Lines that passed the error filter
        matched: usize,
        /// Lines actually printed (matched JSON lines without a `text`
        /// field are dropped)
        printed: usize,
    },
}

/// Runs the fetch, scan, print flow against the configured API.
pub struct Reporter {
    client: VercelClient,
    tail: usize,
    filter: ErrorFilter,
}

impl Reporter {
    /// Create a reporter from resolved configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: VercelClient::new(config)?,
            tail: config.tail,
            filter: ErrorFilter::new(&config.patterns),
        })
    }

    /// Fetch the most recent deployment and write its error report.
    ///
    /// Writes nothing at all when the platform has no deployments. Once a
    /// deployment exists the header is always written, even when no line
    /// matches. The header only goes out after the events body has been
    /// fetched, so a failed fetch never leaves a dangling header.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<ReportOutcome> {
        let Some(deployment) = self
            .client
            .latest_deployment()
            .await
            .context("Failed to list deployments")?
        else {
            return Ok(ReportOutcome::NoDeployments);
        };

        let events = self
            .client
            .deployment_events(&deployment.id)
            .await
            .with_context(|| {
                format!("Failed to fetch events for deployment '{}'", deployment.id)
            })?;

        let scan = collect_errors(&events, self.tail, &self.filter);

        writeln!(out, "{REPORT_HEADER}").context("Failed to write report")?;
        for line in &scan.lines {
            writeln!(out, "{}", line.message()).context("Failed to write report")?;
        }

        Ok(ReportOutcome::Completed {
            deployment,
            scanned: scan.scanned,
            matched: scan.matched,
            printed: scan.lines.len(),
        })
    }
}

/// Result of scanning an events body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorScan {
    /// Printable lines, in log order
    pub lines: Vec<EventLine>,
    /// Number of tail lines considered
    pub scanned: usize,
    /// Lines that passed the error filter
    pub matched: usize,
}

/// Scan the tail of an events body for error-like lines.
#[must_use]
pub fn collect_errors(events: &str, tail: usize, filter: &ErrorFilter) -> ErrorScan {
    let window = tail_lines(events, tail);
    let scanned = window.len();

    let mut matched = 0;
    let mut lines = Vec::new();
    for line in window {
        if !filter.matches(line) {
            continue;
        }
        matched += 1;
        if let Some(event) = parse_line(line) {
            lines.push(event);
        }
    }

    ErrorScan {
        lines,
        scanned,
        matched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{numbered_lines, test_config};

    const EVENTS_MIXED: &str = r#"{"text": "Build succeeded"}
{"text": "Step failed: timeout"}
plain error without json"#;

    #[test]
    fn test_collect_errors_mixed_fixture() {
        let scan = collect_errors(EVENTS_MIXED, 50, &ErrorFilter::default());

        assert_eq!(scan.scanned, 3);
        assert_eq!(scan.matched, 2);
        assert_eq!(
            scan.lines,
            vec![
                EventLine::Text("Step failed: timeout".to_string()),
                EventLine::Raw("plain error without json".to_string()),
            ]
        );
    }

    #[test]
    fn test_collect_errors_drops_json_without_text() {
        let events = "{\"type\": \"stderr\", \"level\": \"error\"}\nerror: real one";
        let scan = collect_errors(events, 50, &ErrorFilter::default());

        // Both lines matched; only the one with printable content survives.
        assert_eq!(scan.matched, 2);
        assert_eq!(scan.lines, vec![EventLine::Raw("error: real one".to_string())]);
    }

    #[test]
    fn test_collect_errors_skips_lines_before_the_window() {
        let events = format!("error: ancient failure\n{}", numbered_lines(59));
        let scan = collect_errors(&events, 50, &ErrorFilter::default());

        assert_eq!(scan.scanned, 50);
        assert_eq!(scan.matched, 0);
        assert!(scan.lines.is_empty());
    }

    #[test]
    fn test_collect_errors_keeps_lines_inside_the_window() {
        let events = format!("{}\nerror: recent failure", numbered_lines(59));
        let scan = collect_errors(&events, 50, &ErrorFilter::default());

        assert_eq!(scan.scanned, 50);
        assert_eq!(scan.matched, 1);
        assert_eq!(
            scan.lines,
            vec![EventLine::Raw("error: recent failure".to_string())]
        );
    }

    #[test]
    fn test_collect_errors_trailing_newline_counts_against_window() {
        let scan = collect_errors("step failed\n", 2, &ErrorFilter::default());

        // "step failed\n" splits into ["step failed", ""].
        assert_eq!(scan.scanned, 2);
        assert_eq!(scan.matched, 1);
    }

    #[test]
    fn test_collect_errors_empty_body() {
        let scan = collect_errors("", 50, &ErrorFilter::default());

        assert_eq!(scan.scanned, 1);
        assert_eq!(scan.matched, 0);
        assert!(scan.lines.is_empty());
    }

    #[test]
    fn test_collect_errors_custom_patterns() {
        let filter = ErrorFilter::new(&["panic"]);
        let scan = collect_errors("thread panicked\nerror: ignored", 50, &filter);

        assert_eq!(scan.matched, 1);
        assert_eq!(scan.lines, vec![EventLine::Raw("thread panicked".to_string())]);
    }

    #[test]
    fn test_reporter_builds_from_config() {
        let config = test_config("http://127.0.0.1:9");
        assert!(Reporter::new(&config).is_ok());
    }
}
