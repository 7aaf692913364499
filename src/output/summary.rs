//! Run summary types
//!
//! A `RunSummary` is what one pass over the input produced; the final line
//! tally comes from the record store afterwards.

use crate::storage::LineCounts;
use std::time::Duration;

/// Outcome counts of a single run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Requests in the input
    pub total: usize,

    /// Requests passed over while scanning for the checkpoint
    pub skipped: usize,

    /// Requests looked up in this run
    pub processed: usize,

    /// Result rows written with status `FOUND`
    pub found: usize,

    /// Result rows written with status `NOT_FOUND`
    pub not_found: usize,

    /// Requests written to the error file
    pub failed: usize,

    /// Checkpoint that never occurred in the input, if any
    pub missing_checkpoint: Option<String>,

    /// Line tally of the files after the run
    pub counts: Option<LineCounts>,

    pub elapsed: Duration,
}

impl RunSummary {
    /// Requests that reached the output file in this run
    pub fn written(&self) -> usize {
        self.found + self.not_found
    }

    /// Logs the end-of-run banner
    pub fn log(&self) {
        tracing::info!("==================== Sweep finished ====================");
        tracing::info!(
            "Requests: {} total, {} skipped, {} processed in {:.1}s",
            self.total,
            self.skipped,
            self.processed,
            self.elapsed.as_secs_f64()
        );
        tracing::info!(
            "Results: {} found, {} not found, {} failed",
            self.found,
            self.not_found,
            self.failed
        );

        if let Some(checkpoint) = &self.missing_checkpoint {
            tracing::warn!(
                "Checkpoint {} was not found in the input; no request was processed",
                checkpoint
            );
        }

        if let Some(counts) = &self.counts {
            tracing::info!("Total number of lines in input file is {}", counts.input);
            tracing::info!("Total number of lines in output file is {}", counts.output);
            tracing::info!("Total number of lines in error file is {}", counts.errors);
        }
    }
}
