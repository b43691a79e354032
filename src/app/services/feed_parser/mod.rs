//! Parser for the canal discharge feed
//!
//! The feed is a comma-delimited text file with one header line followed by
//! data rows laid out as: segment, object code, object name, country,
//! parameter, ISO date, value, source filename. Quoted fields may embed the
//! delimiter.
//!
//! ## Architecture
//!
//! - [`line_parser`] - Splitting one line into trimmed fields
//! - [`field_parsers`] - Explicit outcomes for value and date fields
//! - [`record_builder`] - Mapping split rows onto validated records
//! - [`parser`] - Orchestration over the whole feed text
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use canal_discharge::app::services::feed_parser::FeedParser;
//! use canal_discharge::config::ParsingConfig;
//!
//! # fn example() -> canal_discharge::Result<()> {
//! let text = "segment,code,name,country,parameter,date,value,file\n\
//!             Upper,LNK,Left canal,Uzbekistan,Q,2020-04-01,30,apr_2020.xlsx";
//! let result = FeedParser::new(&ParsingConfig::default()).parse_text(text, "inline")?;
//! assert_eq!(result.record_count(), 1);
//! # Ok(())
//! # }
//! ```

pub mod field_parsers;
pub mod line_parser;
pub mod parser;
pub mod record_builder;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use field_parsers::FieldOutcome;
pub use line_parser::split_line;
pub use parser::FeedParser;
pub use record_builder::{RecordBuilder, RowRejection};
pub use stats::{ParseResult, ParseStats};
