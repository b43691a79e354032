//! Canal Discharge Library
//!
//! A Rust library for ingesting and analysing daily discharge (flow-rate)
//! measurements of irrigation canals published as a single delimited feed.
//!
//! This library provides tools for:
//! - Fetching the feed over HTTP(S) or reading a local snapshot
//! - Parsing quoted, comma-delimited rows into typed discharge records
//! - Flagging physically implausible values against rated canal capacities
//! - Deduplicating records pulled from overlapping monthly source files
//! - Seasonal, yearly and multi-year volume statistics for presentation
//! - A single-slot cache with explicit load / get / invalidate lifecycle

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod analytics;
        pub mod catalog;
        pub mod discharge_store;
        pub mod feed_parser;
        pub mod feed_source;
        pub mod record_processor;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod output;
}

// Re-export commonly used types
pub use app::models::{DischargeRecord, Season, SeasonalAnalytics, YearlyComparison};
pub use app::services::discharge_store::{DischargeStore, Snapshot};
pub use config::Config;

/// Result type alias for the canal discharge pipeline
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for feed loading and processing
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Network transport failure while retrieving the feed
    #[error("Failed to fetch feed from '{url}': {source}")]
    FeedFetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The feed server answered with a non-success status
    #[error("Feed request to '{url}' returned HTTP {status}")]
    FeedStatus { url: String, status: u16 },

    /// The feed body contained no header line
    #[error("Feed from '{source_name}' is empty")]
    FeedEmpty { source_name: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Date parsing error
    #[error("Date parsing error: {message}")]
    DateParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The store was queried before any successful load
    #[error("No discharge data loaded")]
    NotLoaded,
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a transport error for a feed URL
    pub fn feed_fetch(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::FeedFetch {
            url: url.into(),
            source,
        }
    }

    /// Create a non-success status error for a feed URL
    pub fn feed_status(url: impl Into<String>, status: u16) -> Self {
        Self::FeedStatus {
            url: url.into(),
            status,
        }
    }

    /// Create an empty feed error
    pub fn feed_empty(source_name: impl Into<String>) -> Self {
        Self::FeedEmpty {
            source_name: source_name.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a date parsing error
    pub fn date_parsing(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateParsing {
            message: message.into(),
            source,
        }
    }

    /// Whether the error came from retrieving the feed rather than processing it
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Self::FeedFetch { .. } | Self::FeedStatus { .. } | Self::FeedEmpty { .. } | Self::Io { .. }
        )
    }
}
