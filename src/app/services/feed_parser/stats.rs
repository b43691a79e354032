//! Parsing statistics and result structures for feed parsing
//!
//! Rows that are skipped or rejected never raise errors; they are counted
//! here so data-quality gaps stay visible to the caller.

use crate::app::models::DischargeRecord;
use serde::Serialize;

/// Statistics for a feed parsing run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseStats {
    /// Data lines after the header, including blank ones
    pub total_lines: usize,
    /// Lines that were empty after trimming
    pub blank_lines: usize,
    /// Rows discarded for having too few fields
    pub short_rows_skipped: usize,
    /// Rows whose value failed to parse (coerced or rejected per policy)
    pub unparsable_values: usize,
    /// Rows discarded because the date failed to parse
    pub unparsable_dates: usize,
    /// Rows discarded for any reason other than being blank
    pub rows_rejected: usize,
    /// Records successfully built
    pub records_built: usize,
    /// Built records flagged invalid by the capacity validator
    pub invalid_records: usize,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Percentage of non-blank lines that produced a record
    pub fn success_rate(&self) -> f64 {
        let candidates = self.total_lines.saturating_sub(self.blank_lines);
        if candidates == 0 {
            100.0
        } else {
            (self.records_built as f64 / candidates as f64) * 100.0
        }
    }

    /// Get summary string for logging
    pub fn summary(&self) -> String {
        format!(
            "Parse Summary: {} lines -> {} records ({:.1}% success) | \
             Short rows: {} | Bad dates: {} | Bad values: {} | Flagged invalid: {}",
            self.total_lines,
            self.records_built,
            self.success_rate(),
            self.short_rows_skipped,
            self.unparsable_dates,
            self.unparsable_values,
            self.invalid_records
        )
    }
}

/// Records produced by the parser together with their statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Records in original line order
    pub records: Vec<DischargeRecord>,
    pub stats: ParseStats,
}

impl ParseResult {
    pub fn new(records: Vec<DischargeRecord>, stats: ParseStats) -> Self {
        Self { records, stats }
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}
