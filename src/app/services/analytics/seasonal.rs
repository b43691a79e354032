//! Seasonal volume and discharge statistics
//!
//! Works over any subset of records. Only valid records contribute; an empty
//! or all-invalid subset yields all-zero statistics rather than NaN.

use crate::app::models::{DischargeRecord, SeasonalAnalytics};
use crate::constants::{CUBIC_METERS_PER_MILLION, SECONDS_PER_DAY};

/// Compute seasonal analytics over the valid records of a subset
pub fn calculate_seasonal_analytics<'a, I>(records: I) -> SeasonalAnalytics
where
    I: IntoIterator<Item = &'a DischargeRecord>,
{
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut total_volume = 0.0;
    let mut max = f64::NEG_INFINITY;
    let mut min = f64::INFINITY;

    for value in records.into_iter().filter(|r| !r.is_invalid()).map(|r| r.value()) {
        count += 1;
        sum += value;
        total_volume += daily_volume(value);
        max = max.max(value);
        min = min.min(value);
    }

    if count == 0 {
        return SeasonalAnalytics::default();
    }

    let avg_discharge = sum / count as f64;
    let variability_index = if avg_discharge > 0.0 {
        (max - min) / avg_discharge
    } else {
        0.0
    };

    SeasonalAnalytics {
        total_volume,
        total_volume_million: total_volume / CUBIC_METERS_PER_MILLION,
        avg_discharge,
        max_discharge: max,
        min_discharge: min,
        days_count: count,
        variability_index,
    }
}

/// Daily volume in m³ for a discharge rate in m³/s
pub fn daily_volume(discharge: f64) -> f64 {
    discharge * SECONDS_PER_DAY
}
