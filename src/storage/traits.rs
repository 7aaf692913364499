//! Storage traits and error types
//!
//! This module defines the trait interface for record store backends and
//! associated error types.

use crate::records::{Request, ResultRecord};
use crate::storage::LineCounts;
use crate::InputError;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Input(#[from] InputError),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for record store implementations
///
/// Every append is durable before the call returns: a record that was
/// reported as written survives a crash of the process.
pub trait RecordStore: Send {
    // ===== Input =====

    /// Loads every request of the batch, in file order
    ///
    /// Fails on the first malformed line; nothing is processed in that case.
    fn load_requests(&self) -> StorageResult<Vec<Request>>;

    // ===== Output =====

    /// Creates the output file with its header row if it does not exist yet
    ///
    /// Returns `true` if the header was written by this call.
    fn ensure_output_initialized(&mut self) -> StorageResult<bool>;

    /// Appends one result row
    fn append_result(&mut self, record: &ResultRecord) -> StorageResult<()>;

    /// Appends the raw input line of a request that failed
    fn append_failure(&mut self, raw_line: &str) -> StorageResult<()>;

    // ===== Checkpoint =====

    /// Strike ID of the last request that completed successfully
    fn last_checkpoint(&self) -> StorageResult<Option<String>>;

    /// Records `strike_id` as the newest completed request
    fn record_checkpoint(&mut self, strike_id: &str) -> StorageResult<()>;

    // ===== Statistics =====

    /// Counts the lines in the input, output and error files
    fn line_counts(&self) -> StorageResult<LineCounts>;
}
