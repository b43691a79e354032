//! Heuristic extraction of a reporting period from source filenames
//!
//! Source files are monthly reports whose names carry a year and a localized
//! month name, e.g. `БВО Сырдарья апрель 2020.xlsx`. The extraction is
//! best-effort: the first run of four ASCII digits is taken as the year even when
//! it is some unrelated number.

use crate::constants::MONTH_NAMES;
use regex::Regex;
use std::sync::LazyLock;

/// First run of four consecutive ASCII digits
static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]{4}").expect("Invalid regex"));

/// First four-digit run in the filename, or 0 when there is none
pub fn extract_year(filename: &str) -> i32 {
    YEAR_RE
        .find(filename)
        .and_then(|m| m.as_str().parse::<i32>().ok())
        .unwrap_or(0)
}

/// Month number of the first localized month name found, or 0
pub fn extract_month(filename: &str) -> u32 {
    let lowered = filename.to_lowercase();
    MONTH_NAMES
        .iter()
        .find(|(name, _)| lowered.contains(name))
        .map(|(_, number)| *number)
        .unwrap_or(0)
}

/// Whether the filename encodes exactly the given year and month
pub fn matches_date(filename: &str, year: i32, month: u32) -> bool {
    extract_year(filename) == year && extract_month(filename) == month
}
