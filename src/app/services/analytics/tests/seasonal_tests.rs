//! Tests for seasonal analytics

use super::*;
use crate::app::models::{SeasonalAnalytics, Season};
use crate::app::services::analytics::seasonal::calculate_seasonal_analytics;

#[test]
fn test_empty_subset_is_all_zero() {
    let records: Vec<DischargeRecord> = Vec::new();
    let analytics = calculate_seasonal_analytics(&records);

    assert_eq!(analytics, SeasonalAnalytics::default());
    assert_eq!(analytics.days_count, 0);
    assert!(!analytics.avg_discharge.is_nan());
}

#[test]
fn test_all_invalid_subset_is_all_zero() {
    let records = vec![
        record("LNK", "Uzbekistan", "2020-04-01", 50.0),
        record("LNK", "Uzbekistan", "2020-04-02", -2.0),
    ];
    assert!(records.iter().all(|r| r.is_invalid()));

    let analytics = calculate_seasonal_analytics(&records);
    assert_eq!(analytics, SeasonalAnalytics::default());
}

#[test]
fn test_statistics_over_valid_records() {
    let records = vec![
        uncapped("2020-05-01", 10.0),
        uncapped("2020-05-02", 20.0),
        uncapped("2020-05-03", 30.0),
    ];

    let analytics = calculate_seasonal_analytics(&records);

    assert_eq!(analytics.days_count, 3);
    assert_close(analytics.avg_discharge, 20.0);
    assert_close(analytics.max_discharge, 30.0);
    assert_close(analytics.min_discharge, 10.0);
    assert_close(analytics.total_volume, 60.0 * 86_400.0);
    assert_close(analytics.total_volume_million, 5.184);
    assert_close(analytics.variability_index, 1.0);
}

#[test]
fn test_variability_zero_when_average_zero() {
    let records = vec![uncapped("2020-05-01", 0.0), uncapped("2020-05-02", 0.0)];

    let analytics = calculate_seasonal_analytics(&records);

    assert_eq!(analytics.days_count, 2);
    assert_eq!(analytics.variability_index, 0.0);
}

#[test]
fn test_lnk_scenario_by_season() {
    let records = vec![
        record("LNK", "Uzbekistan", "2020-04-01", 30.0),
        record("LNK", "Uzbekistan", "2020-04-02", 40.0),
        record("LNK", "Uzbekistan", "2020-10-01", 10.0),
    ];

    let vegetation = calculate_seasonal_analytics(
        records.iter().filter(|r| r.season() == Season::Vegetation),
    );
    assert_eq!(vegetation.days_count, 1);
    assert_close(vegetation.avg_discharge, 30.0);
    assert_close(vegetation.total_volume_million, 2.592);

    let non_vegetation = calculate_seasonal_analytics(
        records.iter().filter(|r| r.season() == Season::NonVegetation),
    );
    assert_eq!(non_vegetation.days_count, 1);
    assert_close(non_vegetation.avg_discharge, 10.0);
}

#[test]
fn test_single_record() {
    let records = vec![uncapped("2020-01-15", 7.5)];
    let analytics = calculate_seasonal_analytics(&records);

    assert_eq!(analytics.days_count, 1);
    assert_close(analytics.max_discharge, 7.5);
    assert_close(analytics.min_discharge, 7.5);
    assert_eq!(analytics.variability_index, 0.0);
}
