//! Data models for canal discharge processing
//!
//! This module contains the core data structures for representing discharge
//! records and the aggregate structures computed from them. Records are built
//! once per feed load and never mutated afterwards.

use crate::app::services::record_processor::validate_discharge;
use crate::constants::{self, VEGETATION_MONTHS};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Season
// =============================================================================

/// Agronomic season split of the calendar year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    /// April to September inclusive
    Vegetation,
    /// January to March and October to December
    NonVegetation,
}

impl Season {
    /// Season containing the given calendar month (1-12)
    pub fn from_month(month: u32) -> Self {
        if VEGETATION_MONTHS.contains(&month) {
            Season::Vegetation
        } else {
            Season::NonVegetation
        }
    }

    /// Wire name as used by the feed consumers
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Vegetation => "vegetation",
            Season::NonVegetation => "non_vegetation",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "vegetation" | "veg" => Ok(Season::Vegetation),
            "non_vegetation" | "nonvegetation" | "non_veg" => Ok(Season::NonVegetation),
            _ => Err(crate::Error::data_validation(format!(
                "Unknown season '{}' (expected 'vegetation' or 'non_vegetation')",
                s
            ))),
        }
    }
}

// =============================================================================
// Discharge Record
// =============================================================================

/// A code together with its localized display name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalizedCode {
    /// Code as it appears in the feed
    pub code: String,
    /// Localized name, or the code itself when no translation is known
    pub display_name: String,
}

impl LocalizedCode {
    /// Build from a raw code using a translation lookup
    pub fn translate(code: &str, lookup: fn(&str) -> &str) -> Self {
        Self {
            code: code.to_string(),
            display_name: lookup(code).to_string(),
        }
    }
}

/// Outcome of validating a discharge value against physical bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationVerdict {
    Valid,
    Invalid { reason: String },
}

impl ValidationVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationVerdict::Valid)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            ValidationVerdict::Valid => None,
            ValidationVerdict::Invalid { reason } => Some(reason),
        }
    }
}

/// One daily discharge measurement for a canal object
///
/// Temporal fields are derived from `date` at construction, so `year`,
/// `month` and `season` always agree with it. Fields are private to keep
/// the validation verdict fixed once built; use the accessors.
///
/// Deserialization reads only the source fields and rebuilds the rest, so
/// serialized `year`, `month`, `season` and verdict values are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRecord")]
pub struct DischargeRecord {
    segment: LocalizedCode,
    object_code: String,
    object_name: String,
    country: LocalizedCode,
    parameter: String,
    date: NaiveDate,
    year: i32,
    month: u32,
    season: Season,
    /// Discharge rate in m³/s
    value: f64,
    source_file: String,
    verdict: ValidationVerdict,
}

/// Serialized form accepted when deserializing a record
#[derive(Deserialize)]
struct RawRecord {
    segment: LocalizedCode,
    object_code: String,
    object_name: String,
    country: LocalizedCode,
    parameter: String,
    date: NaiveDate,
    value: f64,
    source_file: String,
}

impl From<RawRecord> for DischargeRecord {
    fn from(raw: RawRecord) -> Self {
        let verdict = validate_discharge(&raw.object_code, raw.value);
        let fields = RecordFields {
            segment: raw.segment.code,
            object_code: raw.object_code,
            object_name: raw.object_name,
            country: raw.country.code,
            parameter: raw.parameter,
            source_file: raw.source_file,
        };
        DischargeRecord::new(fields, raw.date, raw.value, verdict)
    }
}

/// Raw identity and payload fields used to construct a record
#[derive(Debug, Clone, Default)]
pub struct RecordFields {
    pub segment: String,
    pub object_code: String,
    pub object_name: String,
    pub country: String,
    pub parameter: String,
    pub source_file: String,
}

impl DischargeRecord {
    /// Create a record, deriving temporal fields and display names
    pub fn new(fields: RecordFields, date: NaiveDate, value: f64, verdict: ValidationVerdict) -> Self {
        let month = date.month();
        Self {
            segment: LocalizedCode::translate(&fields.segment, constants::segment_display_name),
            object_code: fields.object_code,
            object_name: fields.object_name,
            country: LocalizedCode::translate(&fields.country, constants::country_display_name),
            parameter: fields.parameter,
            date,
            year: date.year(),
            month,
            season: Season::from_month(month),
            value,
            source_file: fields.source_file,
            verdict,
        }
    }

    pub fn segment(&self) -> &LocalizedCode {
        &self.segment
    }

    pub fn object_code(&self) -> &str {
        &self.object_code
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    pub fn country(&self) -> &LocalizedCode {
        &self.country
    }

    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// ISO-8601 rendering of the measurement date
    pub fn date_iso(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn season(&self) -> Season {
        self.season
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    pub fn verdict(&self) -> &ValidationVerdict {
        &self.verdict
    }

    pub fn is_invalid(&self) -> bool {
        !self.verdict.is_valid()
    }

    pub fn invalid_reason(&self) -> Option<&str> {
        self.verdict.reason()
    }

    /// Identity of the physical measurement: (object code, country, date)
    pub fn identity_key(&self) -> RecordKey {
        RecordKey {
            object_code: self.object_code.clone(),
            country: self.country.code.clone(),
            date: self.date,
        }
    }
}

/// Deduplication key for discharge records
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    pub object_code: String,
    pub country: String,
    pub date: NaiveDate,
}

// =============================================================================
// Aggregate Structures
// =============================================================================

/// Volume and discharge statistics over a subset of valid records
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalAnalytics {
    /// Integrated daily volume in m³
    pub total_volume: f64,
    /// Integrated daily volume in millions of m³
    pub total_volume_million: f64,
    pub avg_discharge: f64,
    pub max_discharge: f64,
    pub min_discharge: f64,
    /// Number of valid records that contributed
    pub days_count: usize,
    /// (max - min) / avg, or 0 when avg is 0
    pub variability_index: f64,
}

/// Seasonal breakdown for one calendar year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyComparison {
    pub year: i32,
    pub vegetation: SeasonalAnalytics,
    pub non_vegetation: SeasonalAnalytics,
    /// Vegetation / non-vegetation average discharge, or 0 without a denominator
    pub seasonality_coefficient: f64,
    /// Sum of both seasons' volumes in millions of m³
    pub total_annual: f64,
}

/// Typical-season figures averaged across years
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonAverage {
    /// Mean seasonal volume in millions of m³
    pub avg_volume: f64,
    pub avg_discharge: f64,
}

/// Mean of yearly seasonal figures across all years in a comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiYearAverage {
    pub years: usize,
    pub vegetation: SeasonAverage,
    pub non_vegetation: SeasonAverage,
}

/// Share of total volume delivered to one country
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryShare {
    pub country: String,
    /// Volume in millions of m³
    pub volume: f64,
    pub percentage: f64,
}

/// Direction of change between two halves of a period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Increase,
    Decrease,
    Stable,
}

/// Average discharge over one half of a chronologically sorted subset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub avg_discharge: f64,
    pub measurements: usize,
}

/// Comparison of the first and second halves of a subset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodComparison {
    pub first: PeriodSummary,
    pub second: PeriodSummary,
    pub percent_change: f64,
    pub trend: Trend,
}

/// Utilization band of a canal relative to its rated capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilizationBand {
    Low,
    Normal,
    High,
}

/// Average discharge as a share of rated capacity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityUtilization {
    pub object_code: String,
    pub capacity: f64,
    pub avg_discharge: f64,
    pub utilization_percent: f64,
    pub band: UtilizationBand,
}

// =============================================================================
// Catalog Structures
// =============================================================================

/// A canal object as offered to selection controls
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectEntry {
    pub code: String,
    pub name: String,
}

/// Distinct values present in a record set
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    pub countries: Vec<String>,
    pub segments: Vec<String>,
    pub objects: Vec<ObjectEntry>,
    /// `None` for an empty record set; callers supply fallback bounds
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
}
