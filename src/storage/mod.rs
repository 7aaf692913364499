//! Storage module for persisting sweep data
//!
//! This module handles all file operations for the sweeper, including:
//! - Loading and validating the input batch
//! - Appending result rows and failure lines
//! - Reading and recording the resume checkpoint
//! - Line tallies for run summaries

mod files;
mod traits;

pub use files::FileRecordStore;
pub use traits::{RecordStore, StorageError, StorageResult};

use crate::config::FilesConfig;
use std::fmt;

/// Opens the file-backed record store for the configured files
pub fn open_store(files: &FilesConfig, max_quotes: usize) -> FileRecordStore {
    FileRecordStore::new(files, max_quotes)
}

/// Non-blank line counts of the input, output and error files
///
/// The output count excludes the header row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCounts {
    pub input: usize,
    pub output: usize,
    pub errors: usize,
}

impl LineCounts {
    /// Input lines neither written to the output nor to the error file
    pub fn unaccounted(&self) -> usize {
        self.input.saturating_sub(self.output + self.errors)
    }
}

impl fmt::Display for LineCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "input={}, output={}, errors={}",
            self.input, self.output, self.errors
        )
    }
}
