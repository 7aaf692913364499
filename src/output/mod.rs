//! Output module for run summaries and statistics
//!
//! This module handles:
//! - The per-run summary banner
//! - Line tallies and checkpoint status for the `--stats` mode

pub mod stats;
mod summary;

pub use stats::{load_statistics, print_statistics, SweepStatistics};
pub use summary::RunSummary;
