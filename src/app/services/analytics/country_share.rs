//! Distribution of delivered volume between countries

use super::seasonal::daily_volume;
use crate::app::models::{CountryShare, DischargeRecord};
use crate::constants::CUBIC_METERS_PER_MILLION;
use std::collections::HashMap;

/// Per-country volume over valid records, largest first
///
/// Percentages are of the subset total and are 0 when that total is 0.
pub fn calculate_country_share(records: &[DischargeRecord]) -> Vec<CountryShare> {
    let mut volumes: HashMap<&str, f64> = HashMap::new();
    for record in records.iter().filter(|r| !r.is_invalid()) {
        *volumes.entry(record.country().code.as_str()).or_insert(0.0) += daily_volume(record.value());
    }

    let total: f64 = volumes.values().sum();

    let mut shares: Vec<CountryShare> = volumes
        .into_iter()
        .map(|(country, volume)| CountryShare {
            country: country.to_string(),
            volume: volume / CUBIC_METERS_PER_MILLION,
            percentage: if total > 0.0 { volume / total * 100.0 } else { 0.0 },
        })
        .collect();

    shares.sort_by(|a, b| {
        b.volume
            .total_cmp(&a.volume)
            .then_with(|| a.country.cmp(&b.country))
    });
    shares
}
