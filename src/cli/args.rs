//! Command-line argument definitions for the canal discharge tool
//!
//! This module defines the CLI interface using the clap derive API. Record
//! filtering is a consumer concern, so the filter flags live here and are
//! applied by the commands, never by the library services.

use crate::app::models::{DischargeRecord, Season};
use crate::constants::ALL_COUNTRIES;
use crate::{Error, Result};
use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the canal discharge analytics tool
///
/// Loads the daily discharge feed of irrigation canals, cleans and
/// deduplicates it, and prints seasonal and yearly volume statistics.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "canal-discharge",
    version,
    about = "Seasonal and yearly analytics for irrigation canal discharge data",
    long_about = "Fetches the canal discharge feed, validates measurements against rated canal \
                  capacities, removes duplicates from overlapping monthly source files, and \
                  reports seasonal volumes, yearly comparisons, country shares and trends."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// canal-discharge/config.toml in the user config directory.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Feed URL override
    #[arg(
        long = "feed-url",
        value_name = "URL",
        global = true,
        conflicts_with = "feed_file",
        help = "Fetch the feed from this URL instead of the configured one"
    )]
    pub feed_url: Option<String>,

    /// Read the feed from a local file instead of the network
    #[arg(
        long = "file",
        value_name = "PATH",
        global = true,
        help = "Read the feed from a local snapshot file"
    )]
    pub feed_file: Option<PathBuf>,

    /// Discard rows whose value does not parse instead of treating it as 0
    #[arg(long = "reject-unparsable", global = true)]
    pub reject_unparsable: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress output except errors"
    )]
    pub quiet: bool,

    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        global = true,
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// List countries, segments, objects and the covered year range
    Catalog(FilterArgs),
    /// Vegetation vs non-vegetation statistics for the filtered records
    Seasonal(FilterArgs),
    /// Per-year seasonal comparison and multi-year averages
    Yearly(FilterArgs),
    /// Share of delivered volume per country
    Countries(FilterArgs),
    /// Half-period trend and capacity utilization
    Trend(FilterArgs),
}

impl Commands {
    pub fn filters(&self) -> &FilterArgs {
        match self {
            Commands::Catalog(f)
            | Commands::Seasonal(f)
            | Commands::Yearly(f)
            | Commands::Countries(f)
            | Commands::Trend(f) => f,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Commands::Catalog(_) => "catalog",
            Commands::Seasonal(_) => "seasonal",
            Commands::Yearly(_) => "yearly",
            Commands::Countries(_) => "countries",
            Commands::Trend(_) => "trend",
        }
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    Table,
    /// JSON for scripting
    Json,
}

/// Season selector for the `--season` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeasonArg {
    Vegetation,
    NonVegetation,
}

impl From<SeasonArg> for Season {
    fn from(arg: SeasonArg) -> Self {
        match arg {
            SeasonArg::Vegetation => Season::Vegetation,
            SeasonArg::NonVegetation => Season::NonVegetation,
        }
    }
}

/// Record filters shared by all commands
///
/// Segment and country accept either the feed code or its display name.
/// Without `--country` only the "all countries" total rows are selected.
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct FilterArgs {
    #[arg(long = "segment", value_name = "NAME")]
    pub segment: Option<String>,

    #[arg(long = "object", value_name = "CODE")]
    pub object: Option<String>,

    #[arg(long = "country", value_name = "NAME")]
    pub country: Option<String>,

    #[arg(long = "season", value_enum)]
    pub season: Option<SeasonArg>,

    /// First date to include (YYYY-MM-DD)
    #[arg(long = "from", value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Last date to include (YYYY-MM-DD)
    #[arg(long = "to", value_name = "DATE")]
    pub to: Option<NaiveDate>,

    #[arg(long = "year-start", value_name = "YEAR")]
    pub year_start: Option<i32>,

    #[arg(long = "year-end", value_name = "YEAR")]
    pub year_end: Option<i32>,
}

impl FilterArgs {
    /// Validate filter ranges for consistency
    pub fn validate(&self) -> Result<()> {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err(Error::configuration(format!(
                    "--from {} is after --to {}",
                    from, to
                )));
            }
        }

        if let (Some(start), Some(end)) = (self.year_start, self.year_end) {
            if start > end {
                return Err(Error::configuration(format!(
                    "--year-start {} is after --year-end {}",
                    start, end
                )));
            }
        }

        Ok(())
    }

    /// Whether a record passes every filter except the country selector
    pub fn matches_ignoring_country(&self, record: &DischargeRecord) -> bool {
        if let Some(segment) = &self.segment {
            let s = record.segment();
            if &s.code != segment && &s.display_name != segment {
                return false;
            }
        }

        if let Some(object) = &self.object {
            if record.object_code() != object {
                return false;
            }
        }

        if let Some(season) = self.season {
            if record.season() != Season::from(season) {
                return false;
            }
        }

        let date = record.date();
        if self.from.is_some_and(|from| date < from) || self.to.is_some_and(|to| date > to) {
            return false;
        }

        let year = record.year();
        if self.year_start.is_some_and(|start| year < start)
            || self.year_end.is_some_and(|end| year > end)
        {
            return false;
        }

        true
    }

    /// Whether a record passes every filter
    pub fn matches(&self, record: &DischargeRecord) -> bool {
        let country = record.country();
        let country_matches = match &self.country {
            Some(wanted) => &country.code == wanted || &country.display_name == wanted,
            None => country.code == ALL_COUNTRIES,
        };
        country_matches && self.matches_ignoring_country(record)
    }

    /// Records passing every filter, in input order
    pub fn apply(&self, records: &[DischargeRecord]) -> Vec<DischargeRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

impl Args {
    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if let Some(feed_file) = &self.feed_file {
            if !feed_file.is_file() {
                return Err(Error::configuration(format!(
                    "Feed file does not exist: {}",
                    feed_file.display()
                )));
            }
        }

        self.command.filters().validate()
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show the spinner (not in quiet or JSON mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{RecordFields, ValidationVerdict};

    fn record(segment: &str, code: &str, country: &str, date: &str) -> DischargeRecord {
        let fields = RecordFields {
            segment: segment.to_string(),
            object_code: code.to_string(),
            object_name: code.to_string(),
            country: country.to_string(),
            parameter: "Q".to_string(),
            source_file: "f.xlsx".to_string(),
        };
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        DischargeRecord::new(fields, date, 10.0, ValidationVerdict::Valid)
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "canal-discharge",
            "seasonal",
            "--object",
            "LNK",
            "--season",
            "non-vegetation",
            "-vv",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(args.get_log_level(), "debug");
        assert_eq!(args.output_format, OutputFormat::Json);
        assert!(!args.show_progress());
        let filters = args.command.filters();
        assert_eq!(filters.object.as_deref(), Some("LNK"));
        assert_eq!(filters.season, Some(SeasonArg::NonVegetation));
    }

    #[test]
    fn test_feed_url_conflicts_with_file() {
        let result = Args::try_parse_from([
            "canal-discharge",
            "catalog",
            "--feed-url",
            "https://x/feed.csv",
            "--file",
            "feed.csv",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_dates_parse_as_iso() {
        let args = Args::try_parse_from([
            "canal-discharge",
            "yearly",
            "--from",
            "2020-04-01",
            "--to",
            "2020-03-01",
        ])
        .unwrap();
        let filters = args.command.filters();
        assert_eq!(filters.from, NaiveDate::from_ymd_opt(2020, 4, 1));
        assert!(filters.validate().is_err());
    }

    #[test]
    fn test_default_country_selects_totals() {
        let filters = FilterArgs::default();
        assert!(filters.matches(&record("Upper", "LNK", "all", "2020-05-01")));
        assert!(!filters.matches(&record("Upper", "LNK", "Uzbekistan", "2020-05-01")));
    }

    #[test]
    fn test_country_matches_code_or_display_name() {
        let uz = record("Upper", "LNK", "Uzbekistan", "2020-05-01");

        let by_code = FilterArgs {
            country: Some("Uzbekistan".to_string()),
            ..Default::default()
        };
        assert!(by_code.matches(&uz));

        let by_name = FilterArgs {
            country: Some(uz.country().display_name.clone()),
            ..Default::default()
        };
        assert!(by_name.matches(&uz));
    }

    #[test]
    fn test_year_and_date_bounds_are_inclusive() {
        let filters = FilterArgs {
            from: NaiveDate::from_ymd_opt(2020, 5, 1),
            year_end: Some(2020),
            ..Default::default()
        };

        assert!(filters.matches(&record("Upper", "LNK", "all", "2020-05-01")));
        assert!(!filters.matches(&record("Upper", "LNK", "all", "2020-04-30")));
        assert!(!filters.matches(&record("Upper", "LNK", "all", "2021-05-01")));
    }

    #[test]
    fn test_segment_and_season_filters() {
        let filters = FilterArgs {
            segment: Some("Upper".to_string()),
            season: Some(SeasonArg::Vegetation),
            ..Default::default()
        };

        assert!(filters.matches(&record("Upper", "LNK", "all", "2020-05-01")));
        assert!(!filters.matches(&record("Upper", "LNK", "all", "2020-01-01")));
        assert!(!filters.matches(&record("Lower", "LNK", "all", "2020-05-01")));
    }
}
