//! Lookout - Vercel deployment error reporter
//!
//! CLI entry point for the lookout reporter.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use lookout::config::{Config, FileConfig, Overrides};
use lookout::display::StatusDisplay;
use lookout::report::Reporter;

/// Config file consulted when `--config` is not given.
const DEFAULT_CONFIG_PATH: &str = "lookout.toml";

/// Vercel deployment error reporter
///
/// Fetches the most recent deployment from the Vercel API and prints the
/// build-log lines that look like errors or failures.
#[derive(Parser, Debug)]
#[command(name = "lookout", version, about)]
struct Cli {
    /// Vercel API token (falls back to the VERCEL_TOKEN environment variable)
    #[arg(long, env = "VERCEL_TOKEN", hide_env_values = true)]
    token: String,

    /// Base URL of the Vercel API
    #[arg(long)]
    base_url: Option<String>,

    /// Number of trailing log lines to scan
    #[arg(long)]
    tail: Option<usize>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Path to the configuration file (lookout.toml in the working
    /// directory is used when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print progress and a run summary to stderr
    #[arg(long)]
    verbose: bool,
}

/// Load file defaults. An explicit `--config` path must exist; the
/// default path is consulted only when present.
fn load_file_config(path: Option<&PathBuf>) -> Result<FileConfig> {
    path.map_or_else(
        || FileConfig::load_or_default(DEFAULT_CONFIG_PATH),
        |path| {
            FileConfig::load(path)
                .with_context(|| format!("Failed to load config from '{}'", path.display()))
        },
    )
}

/// Collect the flag values that take precedence over file values.
fn overrides_from(cli: &Cli) -> Overrides {
    Overrides {
        base_url: cli.base_url.clone(),
        tail: cli.tail,
        timeout_secs: cli.timeout_secs,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let file = load_file_config(cli.config.as_ref())?;
    let config = Config::resolve(cli.token.clone(), &file, &overrides_from(&cli))?;

    let display = StatusDisplay::new(cli.verbose);
    display.querying(&config.base_url);

    let reporter = Reporter::new(&config)?;
    let mut stdout = std::io::stdout().lock();
    let outcome = reporter.run(&mut stdout).await?;
    stdout.flush().context("Failed to flush stdout")?;

    display.outcome(&outcome);

    Ok(())
}
