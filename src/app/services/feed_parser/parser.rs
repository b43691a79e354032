//! Core feed parsing orchestration
//!
//! Turns the raw text of the feed into records in original line order. The
//! first non-blank line is the header and is never interpreted as data.

use super::line_parser::split_line;
use super::record_builder::{RecordBuilder, RowRejection};
use super::stats::{ParseResult, ParseStats};
use crate::config::ParsingConfig;
use crate::{Error, Result};
use tracing::{debug, info, warn};

/// Parser for the delimited discharge feed
#[derive(Debug, Clone, Default)]
pub struct FeedParser {
    builder: RecordBuilder,
}

impl FeedParser {
    /// Create a parser using the parsing section of the configuration
    pub fn new(config: &ParsingConfig) -> Self {
        Self {
            builder: RecordBuilder::new(config.unparsable_value),
        }
    }

    /// Parse the full feed text
    ///
    /// Blank lines before the header are skipped. Returns `Error::FeedEmpty`
    /// when the text has no header line at all. Every other problem is
    /// row-level and only shows up in the statistics.
    pub fn parse_text(&self, text: &str, source_name: &str) -> Result<ParseResult> {
        let mut lines = text.split('\n').enumerate();

        let Some(header) = lines.by_ref().map(|(_, line)| line.trim()).find(|line| !line.is_empty()) else {
            return Err(Error::feed_empty(source_name));
        };
        debug!("Feed header: {}", header);

        let mut stats = ParseStats::new();
        let mut records = Vec::new();

        for (index, raw_line) in lines {
            stats.total_lines += 1;
            let line = raw_line.trim();
            if line.is_empty() {
                stats.blank_lines += 1;
                continue;
            }

            let fields = split_line(line);
            match self.builder.build(&fields) {
                Ok(built) => {
                    if built.value_coerced {
                        stats.unparsable_values += 1;
                    }
                    if built.record.is_invalid() {
                        stats.invalid_records += 1;
                    }
                    stats.records_built += 1;
                    records.push(built.record);
                }
                Err(rejection) => {
                    stats.rows_rejected += 1;
                    // Line numbers are 1-based and include the header
                    let line_number = index + 1;
                    match rejection {
                        RowRejection::TooFewFields { found } => {
                            stats.short_rows_skipped += 1;
                            debug!("Line {}: skipped, only {} fields", line_number, found);
                        }
                        RowRejection::UnparsableDate { raw, reason } => {
                            stats.unparsable_dates += 1;
                            debug!("Line {}: unparsable date '{}' ({})", line_number, raw, reason);
                        }
                        RowRejection::UnparsableValue { raw, reason } => {
                            stats.unparsable_values += 1;
                            debug!("Line {}: unparsable value '{}' ({})", line_number, raw, reason);
                        }
                    }
                }
            }
        }

        info!("Parsed feed '{}': {}", source_name, stats.summary());
        if stats.rows_rejected > 0 {
            warn!(
                "{} of {} rows from '{}' were discarded",
                stats.rows_rejected, stats.total_lines, source_name
            );
        }

        Ok(ParseResult::new(records, stats))
    }
}
