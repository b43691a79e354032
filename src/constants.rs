//! Application constants for the canal discharge pipeline
//!
//! This module contains the feed layout, physical constants and the static
//! lookup tables (rated canal capacities, display-name translations and month
//! names) used throughout the crate. Tables are plain data; lookups are done
//! with the small helper functions at the bottom of the file.

// =============================================================================
// Source Feed
// =============================================================================

/// Canonical location of the merged long-format discharge feed
pub const DEFAULT_FEED_URL: &str =
    "https://raw.githubusercontent.com/KSMake/Canal_Discharge/main/BWO_merged_long.csv";

/// Environment variable overriding the feed URL
pub const FEED_URL_ENV_VAR: &str = "CANAL_DISCHARGE_FEED_URL";

/// Field delimiter used by the feed
pub const FIELD_DELIMITER: char = ',';

/// Character toggling a quoted span inside a line
pub const QUOTE_CHAR: char = '"';

/// Rows with fewer fields than this are discarded
pub const MIN_FIELD_COUNT: usize = 8;

/// Positional column layout of a feed row
pub mod columns {
    pub const SEGMENT: usize = 0;
    pub const OBJECT_CODE: usize = 1;
    pub const OBJECT_NAME: usize = 2;
    pub const COUNTRY: usize = 3;
    pub const PARAMETER: usize = 4;
    pub const DATE: usize = 5;
    pub const VALUE: usize = 6;
    pub const SOURCE_FILE: usize = 7;
}

/// Pseudo-country marking basin-wide totals rather than a single country
pub const ALL_COUNTRIES: &str = "all";

// =============================================================================
// Physical Constants
// =============================================================================

/// Seconds in a calendar day; one record is one day's average rate
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Cubic meters per million cubic meters
pub const CUBIC_METERS_PER_MILLION: f64 = 1_000_000.0;

/// Tolerance applied above the rated capacity before a value is flagged
pub const CAPACITY_TOLERANCE: f64 = 1.1;

/// First and last month (inclusive) of the vegetation season
pub const VEGETATION_MONTHS: std::ops::RangeInclusive<u32> = 4..=9;

// =============================================================================
// Analytics Thresholds
// =============================================================================

/// Absolute percent change below which two periods are considered stable
pub const STABLE_CHANGE_PERCENT: f64 = 5.0;

/// Capacity utilization bands (percent of rated capacity)
pub mod utilization {
    pub const HIGH_ABOVE: f64 = 90.0;
    pub const LOW_BELOW: f64 = 30.0;
}

// =============================================================================
// Static Lookup Tables
// =============================================================================

/// Rated maximum discharge per object code, in m³/s
pub const CANAL_CAPACITIES: &[(&str, f64)] = &[
    ("LNK", 32.0),
    ("BNK", 61.9),
    ("BFK", 150.0),
    ("KDP", 330.0),
    ("SFK", 110.0),
    ("Zardara", 70.0),
    ("YuGK", 330.0),
    ("NDK", 75.0),
    ("VDK", 43.0),
    ("Dustlik", 230.0),
    ("Mekhnat", 6.0),
    ("Zafarabad", 6.0),
];

/// Localized display names for country codes
pub const COUNTRY_TRANSLATIONS: &[(&str, &str)] = &[
    (ALL_COUNTRIES, "Все страны"),
    ("Uzbekistan", "Узбекистан"),
    ("Kazakhstan", "Казахстан"),
    ("Tajikistan", "Таджикистан"),
    ("Kyrgyzstan", "Кыргызстан"),
    ("Turkmenistan", "Туркменистан"),
];

/// Localized display names for river segment codes
pub const SEGMENT_TRANSLATIONS: &[(&str, &str)] = &[
    ("Toktogul–Shardara", "Токтогул - Шардара"),
    ("Toktogul–BahriTojik", "Токтогул - Бахри Точик"),
    ("BahriTojik–Shardara", "Бахри Точик - Шардара"),
    ("Farkhad", "Фархадская плотина"),
    ("Upper", "Верхний"),
    ("Middle", "Средний"),
    ("Lower", "Нижний"),
    ("Head", "Головной"),
    ("Tail", "Хвостовой"),
];

/// Localized month names as they appear in source filenames
pub const MONTH_NAMES: &[(&str, u32)] = &[
    ("январь", 1),
    ("февраль", 2),
    ("март", 3),
    ("апрель", 4),
    ("май", 5),
    ("июнь", 6),
    ("июль", 7),
    ("август", 8),
    ("сентябрь", 9),
    ("октябрь", 10),
    ("ноябрь", 11),
    ("декабрь", 12),
];

/// Rated capacity for an object code, if one is known
pub fn capacity_for(object_code: &str) -> Option<f64> {
    CANAL_CAPACITIES
        .iter()
        .find(|(code, _)| *code == object_code)
        .map(|(_, capacity)| *capacity)
}

/// Display name for a country code, falling back to the code itself
pub fn country_display_name(code: &str) -> &str {
    lookup(COUNTRY_TRANSLATIONS, code)
}

/// Display name for a segment code, falling back to the code itself
pub fn segment_display_name(code: &str) -> &str {
    lookup(SEGMENT_TRANSLATIONS, code)
}

fn lookup<'a>(table: &'a [(&'a str, &'a str)], code: &'a str) -> &'a str {
    table
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, name)| *name)
        .unwrap_or(code)
}
