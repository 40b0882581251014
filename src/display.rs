//! Verbose status display
//!
//! Human-facing progress and summary lines for `--verbose` runs.
//! All output goes to stderr so stdout remains clean for piping the
//! report itself.

use colored::Colorize;

use crate::report::ReportOutcome;
use crate::vercel::client::Deployment;

/// Stderr status renderer. Prints nothing unless enabled.
pub struct StatusDisplay {
    enabled: bool,
}

impl StatusDisplay {
    /// Create a display handler; pass the `--verbose` flag as `enabled`.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Announce the API about to be queried.
    pub fn querying(&self, base_url: &str) {
        if self.enabled {
            eprintln!("{} {base_url}", "Querying".bold().cyan());
        }
    }

    /// Render the outcome of a completed run.
    pub fn outcome(&self, outcome: &ReportOutcome) {
        if !self.enabled {
            return;
        }
        match outcome {
            ReportOutcome::NoDeployments => {
                eprintln!("{}", "No deployments found".yellow());
            }
            ReportOutcome::Completed {
                deployment,
                scanned,
                matched,
                printed,
            } => {
                eprintln!(
                    "{} {}",
                    "Deployment:".dimmed(),
                    format_deployment(deployment)
                );
                eprintln!(
                    "{} {}",
                    "Scanned:".dimmed(),
                    format_summary(*scanned, *matched, *printed)
                );
            }
        }
    }
}

/// One-line deployment summary: the id, then whatever context fields the
/// platform included.
fn format_deployment(deployment: &Deployment) -> String {
    let mut line = deployment.id.clone();
    if let Some(name) = &deployment.name {
        line.push_str(&format!(" name={name}"));
    }
    if let Some(state) = &deployment.state {
        line.push_str(&format!(" state={state}"));
    }
    if let Some(created) = deployment.created {
        line.push_str(&format!(" created={}", created.format("%Y-%m-%d %H:%M UTC")));
    }
    line
}

/// One-line scan summary.
fn format_summary(scanned: usize, matched: usize, printed: usize) -> String {
    format!("{scanned} line(s) scanned, {matched} matched, {printed} printed")
}
