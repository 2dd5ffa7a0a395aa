//! Site-Tally main entry point
//!
//! This is the command-line interface for the Site-Tally crawler.

use chrono::Utc;
use clap::Parser;
use std::path::{Path, PathBuf};
use site_tally::config::{load_config_with_hash, Config};
use site_tally::crawler::crawl_with_config;
use site_tally::output::{print_statistics, write_csv_report, CrawlStatistics};
use site_tally::url::SiteScope;
use tracing_subscriber::EnvFilter;

/// Site-Tally: a single-site concurrent crawler
///
/// Site-Tally crawls every page reachable from a seed URL without leaving its
/// origin, counts how often each page is linked, and writes a CSV report of the
/// heading, leading paragraph, links and images found on each page.
#[derive(Parser, Debug)]
#[command(name = "site-tally")]
#[command(version = "1.0.0")]
#[command(about = "A single-site concurrent crawler", long_about = None)]
struct Cli {
    /// Absolute http(s) URL to start crawling from
    #[arg(value_name = "URL")]
    url: String,

    /// Number of fetches in flight at once
    #[arg(value_name = "MAX_CONCURRENCY")]
    max_concurrency: Option<usize>,

    /// Maximum number of distinct pages to record
    #[arg(value_name = "MAX_PAGES")]
    max_pages: Option<usize>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Where to write the CSV report
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match handle_crawl(cli).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the crawl summary.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_tally=info,warn"),
            1 => EnvFilter::new("site_tally=debug,info"),
            2 => EnvFilter::new("site_tally=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file if one was given, then applies command-line overrides
fn resolve_config(cli: &Cli) -> site_tally::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(max_concurrency) = cli.max_concurrency {
        config.crawler.max_concurrency = max_concurrency;
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(output) = &cli.output {
        config.output.report_path = output.display().to_string();
    }

    Ok(config)
}

/// Handles the main crawl operation
async fn handle_crawl(cli: Cli) -> site_tally::Result<()> {
    let config = resolve_config(&cli)?;

    // Reject a malformed seed before any request goes out
    let scope = SiteScope::from_seed(&cli.url)?;

    tracing::info!(
        "Starting crawl of {} (concurrency: {}, max pages: {})",
        scope.as_string(),
        config.crawler.max_concurrency,
        config.crawler.max_pages
    );

    let started_at = Utc::now();
    let pages = crawl_with_config(&cli.url, &config).await?;
    let finished_at = Utc::now();

    tracing::info!("Crawl completed with {} pages", pages.len());

    let stats = CrawlStatistics::from_pages(&pages, started_at, finished_at);
    print_statistics(&stats);

    let report_path = Path::new(&config.output.report_path);
    write_csv_report(&pages, report_path)?;
    tracing::info!("Report written to: {}", report_path.display());

    Ok(())
}
