//! Record deduplication for discharge records
//!
//! Overlapping monthly source files repeat measurements. Records sharing an
//! identity key (object code, country, date) describe the same physical
//! measurement and exactly one of them survives.

use super::filename_date::matches_date;
use super::stats::DeduplicationStats;
use crate::app::models::{DischargeRecord, RecordKey};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::{debug, info};

/// Outcome of comparing an incoming duplicate against the kept record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Keep the record already seen
    KeepExisting,
    /// Replace it because the incoming record is valid and the kept one is not
    ReplaceWithValid,
    /// Replace it because only the incoming record's source file matches its date
    ReplaceWithMatchingFile,
}

/// Decide which of two records sharing a key survives
///
/// Precedence:
/// 1. a valid record beats an invalid one
/// 2. between two invalid records the first seen is kept
/// 3. between two valid records, the incoming one wins only if its source
///    filename matches its own year and month and the kept one's does not
pub fn resolve_duplicate(existing: &DischargeRecord, incoming: &DischargeRecord) -> Resolution {
    match (existing.is_invalid(), incoming.is_invalid()) {
        (true, false) => Resolution::ReplaceWithValid,
        (false, true) | (true, true) => Resolution::KeepExisting,
        (false, false) => {
            let existing_matches =
                matches_date(existing.source_file(), existing.year(), existing.month());
            let incoming_matches =
                matches_date(incoming.source_file(), incoming.year(), incoming.month());

            if incoming_matches && !existing_matches {
                Resolution::ReplaceWithMatchingFile
            } else {
                Resolution::KeepExisting
            }
        }
    }
}

/// Deduplicate records in original parse order
///
/// Returns one record per identity key. Survivors are emitted in the order
/// their key was first seen; callers needing chronological order re-sort.
pub fn deduplicate_records(records: Vec<DischargeRecord>) -> (Vec<DischargeRecord>, DeduplicationStats) {
    let mut stats = DeduplicationStats {
        input: records.len(),
        ..Default::default()
    };

    let mut kept: Vec<DischargeRecord> = Vec::with_capacity(records.len());
    let mut index: HashMap<RecordKey, usize> = HashMap::with_capacity(records.len());
    let mut duplicated = Vec::with_capacity(records.len());

    for record in records {
        match index.entry(record.identity_key()) {
            Entry::Vacant(slot) => {
                slot.insert(kept.len());
                kept.push(record);
                duplicated.push(false);
            }
            Entry::Occupied(slot) => {
                stats.duplicates_removed += 1;
                let position = *slot.get();
                duplicated[position] = true;
                let existing = &kept[position];

                match resolve_duplicate(existing, &record) {
                    Resolution::KeepExisting => {}
                    Resolution::ReplaceWithValid => {
                        stats.replaced_by_valid += 1;
                        debug!("Duplicate {:?}: valid record replaces invalid one", slot.key());
                        kept[position] = record;
                    }
                    Resolution::ReplaceWithMatchingFile => {
                        stats.replaced_by_file_match += 1;
                        debug!(
                            "Duplicate {:?}: '{}' replaces '{}' (file matches date)",
                            slot.key(),
                            record.source_file(),
                            existing.source_file()
                        );
                        kept[position] = record;
                    }
                }
            }
        }
    }

    stats.output = kept.len();
    stats.duplicate_groups = duplicated.iter().filter(|&&seen| seen).count();

    info!(
        "Deduplication complete: {} -> {} records ({} duplicates removed)",
        stats.input, stats.output, stats.duplicates_removed
    );

    (kept, stats)
}

/// Analyze duplicate patterns in a collection of records
///
/// # Returns
///
/// Tuple of (distinct keys, keys with duplicates, surplus records)
pub fn analyze_duplicate_patterns(records: &[DischargeRecord]) -> (usize, usize, usize) {
    let mut groups: HashMap<RecordKey, usize> = HashMap::new();
    for record in records {
        *groups.entry(record.identity_key()).or_insert(0) += 1;
    }

    let total_groups = groups.len();
    let duplicate_groups = groups.values().filter(|&&count| count > 1).count();
    let total_duplicates = groups.values().map(|&count| count.saturating_sub(1)).sum();

    (total_groups, duplicate_groups, total_duplicates)
}

/// Check if two records describe the same physical measurement
pub fn are_duplicates(a: &DischargeRecord, b: &DischargeRecord) -> bool {
    a.object_code() == b.object_code() && a.country().code == b.country().code && a.date() == b.date()
}
