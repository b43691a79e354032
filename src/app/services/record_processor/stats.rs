//! Processing statistics and result structures for record processing
//!
//! Tracks what deduplication did to a parsed record set so the loader can
//! report it alongside the parse statistics.

use crate::app::models::DischargeRecord;
use serde::Serialize;

/// Statistics for one deduplication pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeduplicationStats {
    /// Records before deduplication
    pub input: usize,
    /// Records after deduplication
    pub output: usize,
    /// Records dropped as duplicates of an earlier key
    pub duplicates_removed: usize,
    /// Keys that had more than one record
    pub duplicate_groups: usize,
    /// Times a valid record displaced an invalid one
    pub replaced_by_valid: usize,
    /// Times a record from a date-matching source file displaced another
    pub replaced_by_file_match: usize,
}

impl DeduplicationStats {
    /// Percentage of input records removed as duplicates
    pub fn reduction_percentage(&self) -> f64 {
        if self.input == 0 {
            0.0
        } else {
            (self.duplicates_removed as f64 / self.input as f64) * 100.0
        }
    }

    /// Get summary string for logging
    pub fn summary(&self) -> String {
        format!(
            "Deduplication Summary: {} -> {} records ({:.1}% removed) | \
             Groups: {} | Valid replacements: {} | File-match replacements: {}",
            self.input,
            self.output,
            self.reduction_percentage(),
            self.duplicate_groups,
            self.replaced_by_valid,
            self.replaced_by_file_match
        )
    }
}

/// Result of record processing operations
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// Canonical records, one per identity key
    pub records: Vec<DischargeRecord>,
    pub stats: DeduplicationStats,
}

impl ProcessingResult {
    pub fn new(records: Vec<DischargeRecord>, stats: DeduplicationStats) -> Self {
        Self { records, stats }
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Number of surviving records flagged invalid
    pub fn invalid_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_invalid()).count()
    }
}
