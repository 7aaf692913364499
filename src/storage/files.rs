//! Tab-separated file storage implementation
//!
//! This module provides a plain-file implementation of the RecordStore trait.
//! Each append opens the file, writes one line, syncs it to disk and closes
//! it again.

use crate::config::FilesConfig;
use crate::records::{header_row, parse_requests, Request, ResultRecord};
use crate::storage::traits::{RecordStore, StorageError, StorageResult};
use crate::storage::LineCounts;
use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// File-backed record store
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    input_path: PathBuf,
    output_path: PathBuf,
    error_path: PathBuf,
    checkpoint_path: PathBuf,
    max_quotes: usize,
}

impl FileRecordStore {
    /// Creates a store over the configured files
    ///
    /// # Arguments
    ///
    /// * `files` - Locations of the input, output, error and checkpoint files
    /// * `max_quotes` - Number of quote triples in the output header
    pub fn new(files: &FilesConfig, max_quotes: usize) -> Self {
        Self {
            input_path: PathBuf::from(&files.input_path),
            output_path: PathBuf::from(&files.output_path),
            error_path: PathBuf::from(&files.error_path),
            checkpoint_path: PathBuf::from(&files.checkpoint_path),
            max_quotes,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn checkpoint_path(&self) -> &Path {
        &self.checkpoint_path
    }
}

impl RecordStore for FileRecordStore {
    fn load_requests(&self) -> StorageResult<Vec<Request>> {
        let text = fs::read_to_string(&self.input_path).map_err(|e| file_error(&self.input_path, e))?;
        Ok(parse_requests(&text)?)
    }

    fn ensure_output_initialized(&mut self) -> StorageResult<bool> {
        let is_empty = match fs::metadata(&self.output_path) {
            Ok(metadata) => metadata.len() == 0,
            Err(e) if e.kind() == ErrorKind::NotFound => true,
            Err(e) => return Err(file_error(&self.output_path, e)),
        };

        if !is_empty {
            return Ok(false);
        }

        append_line(&self.output_path, &header_row(self.max_quotes))?;
        tracing::debug!("Wrote output header to {}", self.output_path.display());
        Ok(true)
    }

    fn append_result(&mut self, record: &ResultRecord) -> StorageResult<()> {
        append_line(&self.output_path, &record.to_row(self.max_quotes))
    }

    fn append_failure(&mut self, raw_line: &str) -> StorageResult<()> {
        append_line(&self.error_path, raw_line)
    }

    fn last_checkpoint(&self) -> StorageResult<Option<String>> {
        let text = match read_optional(&self.checkpoint_path)? {
            Some(text) => text,
            None => return Ok(None),
        };

        let checkpoint = text
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .and_then(|line| line.split('\t').next())
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());

        Ok(checkpoint)
    }

    fn record_checkpoint(&mut self, strike_id: &str) -> StorageResult<()> {
        let line = format!("{}\t{}", strike_id, Utc::now().to_rfc3339());
        append_line(&self.checkpoint_path, &line)
    }

    fn line_counts(&self) -> StorageResult<LineCounts> {
        let output_lines = count_lines(&self.output_path)?;

        Ok(LineCounts {
            input: count_lines(&self.input_path)?,
            // Header row
            output: output_lines.saturating_sub(1),
            errors: count_lines(&self.error_path)?,
        })
    }
}

fn file_error(path: &Path, source: std::io::Error) -> StorageError {
    StorageError::File {
        path: path.display().to_string(),
        source,
    }
}

/// Appends `line` plus a newline and syncs the file before closing it
fn append_line(path: &Path, line: &str) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| file_error(parent, e))?;
        }
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| file_error(path, e))?;

    writeln!(file, "{}", line).map_err(|e| file_error(path, e))?;
    file.flush().map_err(|e| file_error(path, e))?;
    file.sync_data().map_err(|e| file_error(path, e))?;
    Ok(())
}

/// Reads a file, treating a missing file as `None`
fn read_optional(path: &Path) -> StorageResult<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(file_error(path, e)),
    }
}

/// Number of non-blank lines in a file; zero if it does not exist
fn count_lines(path: &Path) -> StorageResult<usize> {
    Ok(read_optional(path)?
        .map(|text| text.lines().filter(|l| !l.trim().is_empty()).count())
        .unwrap_or(0))
}
