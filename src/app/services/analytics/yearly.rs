//! Yearly seasonal comparison and multi-year averages
//!
//! Records are grouped strictly by their own `year`, so a non-vegetation
//! season spanning a year boundary is split between the two years.

use super::seasonal::calculate_seasonal_analytics;
use crate::app::models::{
    DischargeRecord, MultiYearAverage, Season, SeasonAverage, YearlyComparison,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Build one comparison entry per year present, ascending by year
pub fn calculate_yearly_comparison(records: &[DischargeRecord]) -> Vec<YearlyComparison> {
    let mut by_year: BTreeMap<i32, Vec<&DischargeRecord>> = BTreeMap::new();
    for record in records {
        by_year.entry(record.year()).or_default().push(record);
    }

    debug!("Yearly comparison over {} years", by_year.len());

    by_year
        .into_iter()
        .map(|(year, year_records)| {
            let vegetation = calculate_seasonal_analytics(
                year_records
                    .iter()
                    .copied()
                    .filter(|r| r.season() == Season::Vegetation),
            );
            let non_vegetation = calculate_seasonal_analytics(
                year_records
                    .iter()
                    .copied()
                    .filter(|r| r.season() == Season::NonVegetation),
            );

            let seasonality_coefficient = if non_vegetation.avg_discharge > 0.0 {
                vegetation.avg_discharge / non_vegetation.avg_discharge
            } else {
                0.0
            };

            YearlyComparison {
                year,
                vegetation,
                non_vegetation,
                seasonality_coefficient,
                total_annual: vegetation.total_volume_million + non_vegetation.total_volume_million,
            }
        })
        .collect()
}

/// Average each season's volume and discharge across all years
///
/// Returns `None` for an empty comparison.
pub fn calculate_multi_year_average(yearly: &[YearlyComparison]) -> Option<MultiYearAverage> {
    if yearly.is_empty() {
        return None;
    }

    Some(MultiYearAverage {
        years: yearly.len(),
        vegetation: SeasonAverage {
            avg_volume: mean_of(yearly, |y| y.vegetation.total_volume_million),
            avg_discharge: mean_of(yearly, |y| y.vegetation.avg_discharge),
        },
        non_vegetation: SeasonAverage {
            avg_volume: mean_of(yearly, |y| y.non_vegetation.total_volume_million),
            avg_discharge: mean_of(yearly, |y| y.non_vegetation.avg_discharge),
        },
    })
}

fn mean_of(yearly: &[YearlyComparison], field: impl Fn(&YearlyComparison) -> f64) -> f64 {
    yearly.iter().map(field).sum::<f64>() / yearly.len() as f64
}
