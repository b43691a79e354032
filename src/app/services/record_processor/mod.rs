//! Record processing module for discharge records
//!
//! This module provides the post-parse pipeline: capacity validation used by
//! the record builder, and deduplication of records repeated across
//! overlapping source files.
//!
//! # Architecture
//!
//! - [`validation`] - Negative-value and rated-capacity checks
//! - [`filename_date`] - Year/month heuristic over source filenames
//! - [`deduplication`] - One-record-per-key precedence rules
//! - [`processor`] - RecordProcessor orchestration
//! - [`stats`] - Deduplication statistics and result structures
//!
//! # Quality Flags
//!
//! Validation never deletes data. Records that fail a check keep their value
//! and carry an invalid reason; aggregators skip them.

pub mod deduplication;
pub mod filename_date;
pub mod processor;
pub mod stats;
pub mod validation;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use deduplication::{Resolution, analyze_duplicate_patterns, are_duplicates, deduplicate_records};
pub use filename_date::matches_date;
pub use processor::RecordProcessor;
pub use stats::{DeduplicationStats, ProcessingResult};
pub use validation::validate_discharge;
