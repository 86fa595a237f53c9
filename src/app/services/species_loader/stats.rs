//! Load statistics tracking
//!
//! Counters describing one pass of the loader over a source file.

use std::time::Duration;

/// Statistics about a single load
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    /// Data rows read from the source, excluding the header
    pub rows_read: usize,

    /// Records written to the store
    pub records_loaded: usize,

    /// Rows rejected in lenient mode
    pub rows_skipped: usize,

    /// Time taken to parse and write
    pub load_duration: Duration,

    /// Messages for every rejected row
    pub errors: Vec<String>,
}

impl LoadStats {
    /// Create new empty load statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any rows were rejected
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get a summary string of the load
    pub fn summary(&self) -> String {
        format!(
            "Loaded {} of {} rows ({} skipped) in {:.2}s",
            self.records_loaded,
            self.rows_read,
            self.rows_skipped,
            self.load_duration.as_secs_f64()
        )
    }
}
