//! Lookout - Vercel deployment error reporter
//!
//! Lookout asks the Vercel REST API for the most recent deployment,
//! fetches its build log, and prints the lines that look like errors
//! or failures.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod display;
pub mod report;
pub mod vercel;

#[cfg(test)]
pub mod testutil;

// Re-export commonly used types
pub use config::{Config, FileConfig, Overrides};
pub use display::StatusDisplay;
pub use report::{collect_errors, ErrorScan, ReportOutcome, Reporter};
pub use vercel::client::{ApiError, Deployment, VercelClient};
pub use vercel::events::{parse_line, tail_lines, ErrorFilter, EventLine};
