//! Statistics generation from the record store
//!
//! This module provides functionality for extracting and displaying
//! sweep statistics from the storage layer.

use crate::storage::{LineCounts, RecordStore};
use crate::SweepError;

/// Sweep statistics snapshot
#[derive(Debug, Clone)]
pub struct SweepStatistics {
    /// Line tally of the input, output and error files
    pub counts: LineCounts,

    /// Strike ID the next run would resume after
    pub checkpoint: Option<String>,

    /// Whether the checkpoint occurs in the current input
    ///
    /// `None` when there is no checkpoint or the input could not be parsed.
    pub checkpoint_in_input: Option<bool>,
}

/// Loads statistics from storage
///
/// A malformed input file does not fail the tally; it only leaves
/// `checkpoint_in_input` unknown.
///
/// # Arguments
///
/// * `store` - The record store to query
pub fn load_statistics(store: &dyn RecordStore) -> Result<SweepStatistics, SweepError> {
    let counts = store.line_counts()?;
    let checkpoint = store.last_checkpoint()?;

    let checkpoint_in_input = match &checkpoint {
        Some(id) => match store.load_requests() {
            Ok(requests) => Some(requests.iter().any(|r| &r.strike_id == id)),
            Err(e) => {
                tracing::warn!("Could not read input: {}", e);
                None
            }
        },
        None => None,
    };

    Ok(SweepStatistics {
        counts,
        checkpoint,
        checkpoint_in_input,
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &SweepStatistics) {
    println!("=== Sweep Statistics ===\n");

    println!("Lines:");
    println!("  Input requests: {}", stats.counts.input);
    println!("  Output rows: {}", stats.counts.output);
    println!("  Failed requests: {}", stats.counts.errors);
    println!("  Unaccounted for: {}", stats.counts.unaccounted());
    println!();

    println!("Checkpoint:");
    match (&stats.checkpoint, stats.checkpoint_in_input) {
        (None, _) => println!("  none (next run starts from the first request)"),
        (Some(id), Some(true)) => println!("  {} (next run resumes after it)", id),
        (Some(id), Some(false)) => {
            println!("  {} (NOT in the current input: next run processes nothing)", id)
        }
        (Some(id), None) => println!("  {}", id),
    }

    let accounted = stats.counts.output + stats.counts.errors;
    let completion = if stats.counts.input > 0 {
        (accounted as f64 / stats.counts.input as f64) * 100.0
    } else {
        0.0
    };
    println!(
        "\nCompletion: {:.1}% ({} / {} requests accounted for)",
        completion, accounted, stats.counts.input
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilesConfig;
    use crate::storage::FileRecordStore;
    use std::fs;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> FileRecordStore {
        let path = |name: &str| dir.path().join(name).display().to_string();
        FileRecordStore::new(
            &FilesConfig {
                input_path: path("input.txt"),
                output_path: path("output.txt"),
                error_path: path("error.txt"),
                checkpoint_path: path("identification.txt"),
            },
            10,
        )
    }

    fn input_line(id: &str) -> String {
        let mut fields = vec![id.to_string()];
        fields.extend((1..16).map(|i| format!("f{}", i)));
        fields.join("\t")
    }

    #[test]
    fn test_statistics_of_empty_workspace() {
        let dir = TempDir::new().unwrap();
        let stats = load_statistics(&store(&dir)).unwrap();

        assert_eq!(stats.counts, LineCounts::default());
        assert_eq!(stats.checkpoint, None);
        assert_eq!(stats.checkpoint_in_input, None);
    }

    #[test]
    fn test_checkpoint_presence_in_input() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);
        fs::write(
            dir.path().join("input.txt"),
            format!("{}\n{}\n", input_line("T001"), input_line("T002")),
        )
        .unwrap();

        store.record_checkpoint("T001").unwrap();
        let stats = load_statistics(&store).unwrap();
        assert_eq!(stats.checkpoint.as_deref(), Some("T001"));
        assert_eq!(stats.checkpoint_in_input, Some(true));
        assert_eq!(stats.counts.input, 2);

        store.record_checkpoint("GONE").unwrap();
        let stats = load_statistics(&store).unwrap();
        assert_eq!(stats.checkpoint_in_input, Some(false));
    }

    #[test]
    fn test_malformed_input_leaves_presence_unknown() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);
        fs::write(dir.path().join("input.txt"), "T001\tshort\n").unwrap();
        store.record_checkpoint("T001").unwrap();

        let stats = load_statistics(&store).unwrap();
        assert_eq!(stats.checkpoint_in_input, None);
        assert_eq!(stats.counts.input, 1);
    }
}
