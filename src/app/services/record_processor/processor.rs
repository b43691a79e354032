//! Record processor pipeline orchestration
//!
//! Runs the post-parse stages over a freshly parsed record set. Validation
//! already happened at build time, so the only stage that changes the set is
//! deduplication; the processor adds reporting around it.

use super::deduplication::deduplicate_records;
use super::stats::ProcessingResult;
use crate::app::models::DischargeRecord;
use tracing::{debug, info};

/// Record processor for parsed discharge records
#[derive(Debug, Clone, Default)]
pub struct RecordProcessor;

impl RecordProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Deduplicate records and report what was removed
    pub fn process_records(&self, records: Vec<DischargeRecord>) -> ProcessingResult {
        info!("Starting record processing for {} records", records.len());

        let (records, stats) = deduplicate_records(records);
        let result = ProcessingResult::new(records, stats);

        info!("{}", result.stats.summary());
        debug!(
            "{} of {} canonical records are flagged invalid",
            result.invalid_count(),
            result.record_count()
        );

        result
    }
}
