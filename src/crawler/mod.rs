//! Crawler module for sweeping a batch of requests
//!
//! This module contains the core sweep logic, including:
//! - Resume scanning against the recorded checkpoint
//! - Per-request lookup, row writing and checkpointing
//! - Failure isolation and optional session restarts
//! - Overall run coordination

mod coordinator;

pub use coordinator::{run_crawl, Coordinator};

use crate::config::Config;
use crate::output::RunSummary;
use crate::SweepError;

/// Runs a complete sweep operation
///
/// This is the main entry point for starting a sweep. It will:
/// 1. Open the record store for the configured files
/// 2. Read the checkpoint and load the input batch
/// 3. Launch the page client session
/// 4. Look up every request after the checkpoint
/// 5. Release the session and log the run summary
///
/// # Arguments
///
/// * `config` - The sweep configuration
///
/// # Returns
///
/// * `Ok(RunSummary)` - The pass over the input completed
/// * `Err(SweepError)` - The sweep aborted
pub async fn crawl(config: &Config) -> Result<RunSummary, SweepError> {
    run_crawl(config).await
}
