//! Sumi-Degrees main entry point
//!
//! This is the command-line interface for the Sumi-Degrees path finder.

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use sumi_degrees::config::{load_config_with_hash, validate, Config};
use sumi_degrees::output::{emit_all, ConsoleOutput, JsonFileOutput, OutputHandler, RunReport};
use sumi_degrees::Crawler;
use tracing_subscriber::EnvFilter;

/// Sumi-Degrees: degrees of separation between two wiki pages
///
/// Sumi-Degrees searches breadth-first from a start page, following article
/// links only, until it reaches the target page or runs out of depth. The
/// shortest chain of links found is printed and optionally written as JSON.
#[derive(Parser, Debug)]
#[command(name = "sumi-degrees")]
#[command(version)]
#[command(about = "Shortest link path between two wiki pages", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Start page name or URL
    #[arg(short, long)]
    start: Option<String>,

    /// Target page name or URL
    #[arg(short, long)]
    target: Option<String>,

    /// Maximum number of hops from the start page
    #[arg(short = 'd', long)]
    max_depth: Option<u32>,

    /// Maximum number of fetches in flight
    #[arg(short, long)]
    concurrency: Option<u32>,

    /// Where to write the JSON report (default: output.json)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Print to the console only, without writing the JSON report
    #[arg(long, conflicts_with = "output")]
    no_report: bool,

    /// Validate config and show what would be searched without fetching anything
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(start) = &self.start {
            config.traversal.start = start.clone();
        }
        if let Some(target) = &self.target {
            config.traversal.target = target.clone();
        }
        if let Some(max_depth) = self.max_depth {
            config.crawler.max_depth = max_depth;
        }
        if let Some(concurrency) = self.concurrency {
            config.crawler.concurrency_width = concurrency;
        }
        if let Some(output) = &self.output {
            config.output.result_path = Some(output.display().to_string());
        }
        if self.no_report {
            config.output.result_path = None;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (mut config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            (Config::default(), None)
        }
    };

    cli.apply_overrides(&mut config);
    validate(&config).context("Invalid configuration")?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let report = handle_search(&config, config_hash).await?;

    if !report.succeeded() {
        std::process::exit(1);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_degrees=info,warn"),
            1 => EnvFilter::new("sumi_degrees=debug,info"),
            2 => EnvFilter::new("sumi_degrees=trace,debug"),
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

/// Handles the --dry-run mode: shows the resolved search without fetching
fn handle_dry_run(config: &Config) {
    println!("=== Sumi-Degrees Dry Run ===\n");

    println!("Traversal:");
    println!("  Start: {}", config.traversal.start);
    println!("  Target: {}", config.traversal.target);

    println!("\nCrawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Concurrency width: {}", config.crawler.concurrency_width);
    println!("  Fetch timeout: {}s", config.crawler.fetch_timeout_secs);

    println!("\nSite:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Article prefix: {}", config.site.article_prefix);
    println!("  Skip patterns: {}", config.site.skip_patterns.len());

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);

    match &config.output.result_path {
        Some(path) => println!("\nOutput: {}", path),
        None => println!("\nOutput: console only"),
    }

    println!("\n✓ Configuration is valid");
}

/// Runs the search and emits the report
async fn handle_search(config: &Config, config_hash: Option<String>) -> anyhow::Result<RunReport> {
    let crawler = Crawler::from_config(config).context("Failed to set up the crawler")?;

    let started_at = Utc::now();
    let result = crawler.run().await.context("Search failed")?;

    let mut report = RunReport::new(
        config.traversal.start.clone(),
        config.traversal.target.clone(),
        started_at,
        result,
    );
    if let Some(hash) = config_hash {
        report = report.with_config_hash(hash);
    }

    let json = config.output.result_path.as_ref().map(|path| JsonFileOutput::new(path));
    let mut handlers: Vec<&dyn OutputHandler> = vec![&ConsoleOutput];
    if let Some(json) = &json {
        handlers.push(json);
    }

    emit_all(&handlers, &report).context("Failed to write report")?;

    if let Some(json) = &json {
        tracing::info!("Report written to {}", json.path().display());
    }

    Ok(report)
}
