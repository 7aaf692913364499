//! Sku-Sweep main entry point
//!
//! This is the command-line interface for the Sku-Sweep price sweeper.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use sku_sweep::config::{compute_file_hash, load_config_with_hash, Config};
use sku_sweep::crawler::crawl;
use sku_sweep::output::{load_statistics, print_statistics};
use sku_sweep::storage::{open_store, RecordStore};
use sku_sweep::ResumeState;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Sku-Sweep: a resumable storefront price sweeper
///
/// Sku-Sweep looks every request of a tab-separated input batch up on a
/// storefront, writes one price row per request, and records a checkpoint
/// after each one so that an interrupted batch resumes where it stopped.
#[derive(Parser, Debug)]
#[command(name = "sku-sweep")]
#[command(version)]
#[command(about = "A resumable storefront price sweeper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and input, show what would be processed, and exit
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show line counts and the checkpoint, then exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Configuration comes first: it names the optional log file
    let (config, config_hash) = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    setup_logging(cli.verbose, cli.quiet, config.logging.log_file.as_deref())?;

    match (&cli.config, &config_hash) {
        (Some(path), Some(hash)) => tracing::info!(
            "Configuration loaded from {} (hash: {})",
            path.display(),
            hash
        ),
        _ => tracing::info!("No configuration file given, using defaults"),
    }

    if cli.dry_run {
        handle_dry_run(&config)
    } else if cli.stats {
        handle_stats(&config)
    } else {
        handle_crawl(&config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Console output always goes to stderr; `log_file`, when set, receives the
/// same events without ANSI colors.
fn setup_logging(verbose: u8, quiet: bool, log_file: Option<&str>) -> anyhow::Result<()> {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sku_sweep=info,warn"),
            1 => EnvFilter::new("sku_sweep=debug,info"),
            2 => EnvFilter::new("sku_sweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false);

    let file_layer = match log_file {
        Some(path) => {
            let path = Path::new(path);
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let file_name = path
                .file_name()
                .with_context(|| format!("Log file path {} has no file name", path.display()))?;
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

            let file_appender = RollingFileAppender::new(Rotation::NEVER, dir, file_name);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}

/// Handles the --dry-run mode: validates config and input, shows what would be processed
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Sku-Sweep Dry Run ===\n");

    println!("Site:");
    println!("  Search URL: {}", config.site.search_url);
    println!("  Wait timeout: {}s", config.site.wait_timeout_secs);
    println!("  Max candidates: {}", config.site.max_candidates);

    println!("\nClient:");
    println!("  User agent: {}", config.client.user_agent);
    println!("  Request timeout: {}s", config.client.request_timeout_secs);
    println!("  Poll interval: {}ms", config.client.poll_interval_ms);

    println!("\nFiles:");
    println!("  Input: {}", config.files.input_path);
    println!("  Output: {}", config.files.output_path);
    println!("  Errors: {}", config.files.error_path);
    println!("  Checkpoint: {}", config.files.checkpoint_path);

    println!("\nSession:");
    println!("  Restart on failure: {}", config.session.restart_on_failure);

    let store = open_store(&config.files, config.site.max_candidates);
    let requests = store
        .load_requests()
        .context("Input could not be loaded")?;
    let checkpoint = store.last_checkpoint()?;

    let mut state = ResumeState::from_checkpoint(checkpoint.clone());
    let pending = requests
        .iter()
        .filter(|r| state.admit(&r.strike_id))
        .count();

    println!("\nInput:");
    println!("  Requests: {}", requests.len());
    match &checkpoint {
        Some(id) => println!("  Checkpoint: {}", id),
        None => println!("  Checkpoint: none"),
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Input is well-formed");
    if let Some(id) = checkpoint.filter(|_| !state.is_active()) {
        println!(
            "⚠ Checkpoint {} does not occur in the input: a run would process nothing",
            id
        );
    } else {
        println!("✓ Would process {} request(s)", pending);
    }

    Ok(())
}

/// Handles the --stats mode: shows line counts and the checkpoint
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let store = open_store(&config.files, config.site.max_candidates);
    println!("Output: {}\n", store.output_path().display());

    let stats = load_statistics(&store)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the main sweep operation
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    let input = Path::new(&config.files.input_path);
    match compute_file_hash(input) {
        Ok(hash) => tracing::info!("Input {} fingerprint: {}", input.display(), hash),
        Err(e) => tracing::warn!("Could not fingerprint input {}: {}", input.display(), e),
    }

    match crawl(config).await {
        Ok(summary) => {
            tracing::info!(
                "Sweep completed: {} written, {} failed",
                summary.written(),
                summary.failed
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Sweep failed: {}", e);
            Err(e.into())
        }
    }
}
