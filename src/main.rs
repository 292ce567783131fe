//! Sitesweep main entry point
//!
//! This is the command-line interface for the Sitesweep link counter.

use anyhow::Context;
use clap::Parser;
use sitesweep::config::{load_config, validate_seed_url, Config};
use sitesweep::crawler::crawl;
use sitesweep::output::print_summary;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Sitesweep: count the distinct internal links of a website
///
/// Sitesweep fetches the given page, follows every same-site link it finds
/// with a bounded number of concurrent workers, and reports how many
/// distinct internal URLs were discovered.
#[derive(Parser, Debug)]
#[command(name = "sitesweep")]
#[command(version)]
#[command(about = "Concurrent same-site link counter", long_about = None)]
struct Cli {
    /// Maximum number of concurrent crawl workers
    #[arg(
        short = 'n',
        long = "workers",
        env = "SITESWEEP_WORKERS",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    workers: u32,

    /// Absolute http(s) URL to start crawling from
    #[arg(value_name = "URL", env = "SITESWEEP_URL")]
    url: String,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Reject a bad seed before anything else is set up
    if let Err(e) = validate_seed_url(&cli.url) {
        eprintln!("Invalid URL '{}': {}", cli.url, e);
        return Ok(ExitCode::FAILURE);
    }

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    let workers = usize::try_from(cli.workers).context("Worker count does not fit in usize")?;

    let report = crawl(&cli.url, workers, &config)
        .await
        .with_context(|| format!("Failed to start crawl of {}", cli.url))?;

    print_summary(&report);

    Ok(ExitCode::SUCCESS)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitesweep=info,warn"),
            1 => EnvFilter::new("sitesweep=debug,info"),
            2 => EnvFilter::new("sitesweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}
