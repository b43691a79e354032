//! Tests for period comparison and capacity utilization

use super::*;
use crate::app::models::{Trend, UtilizationBand};
use crate::app::services::analytics::period::{calculate_capacity_utilization, compare_periods};

#[test]
fn test_compare_periods_needs_two_records() {
    assert!(compare_periods(&[]).is_none());
    assert!(compare_periods(&[uncapped("2020-01-01", 1.0)]).is_none());
}

#[test]
fn test_compare_periods_sorts_chronologically() {
    let records = vec![
        uncapped("2020-03-01", 20.0),
        uncapped("2020-01-01", 10.0),
        uncapped("2020-04-01", 20.0),
        uncapped("2020-02-01", 10.0),
    ];

    let comparison = compare_periods(&records).unwrap();

    assert_eq!(comparison.first.start.to_string(), "2020-01-01");
    assert_eq!(comparison.first.end.to_string(), "2020-02-01");
    assert_eq!(comparison.second.start.to_string(), "2020-03-01");
    assert_close(comparison.first.avg_discharge, 10.0);
    assert_close(comparison.second.avg_discharge, 20.0);
    assert_close(comparison.percent_change, 100.0);
    assert_eq!(comparison.trend, Trend::Increase);
}

#[test]
fn test_odd_length_gives_second_half_extra() {
    let records = vec![
        uncapped("2020-01-01", 10.0),
        uncapped("2020-01-02", 10.0),
        uncapped("2020-01-03", 9.8),
    ];

    let comparison = compare_periods(&records).unwrap();

    assert_eq!(comparison.first.measurements, 1);
    assert_eq!(comparison.second.measurements, 2);
    assert_eq!(comparison.trend, Trend::Stable);
}

#[test]
fn test_decrease_and_zero_baseline() {
    let falling = vec![uncapped("2020-01-01", 10.0), uncapped("2020-01-02", 5.0)];
    let comparison = compare_periods(&falling).unwrap();
    assert_close(comparison.percent_change, -50.0);
    assert_eq!(comparison.trend, Trend::Decrease);

    let from_zero = vec![uncapped("2020-01-01", 0.0), uncapped("2020-01-02", 5.0)];
    let comparison = compare_periods(&from_zero).unwrap();
    assert_eq!(comparison.percent_change, 0.0);
    assert_eq!(comparison.trend, Trend::Stable);
}

#[test]
fn test_capacity_utilization_bands() {
    let high = vec![record("LNK", "Uzbekistan", "2020-05-01", 30.0)];
    let utilization = calculate_capacity_utilization(&high).unwrap();
    assert_close(utilization.utilization_percent, 93.75);
    assert_eq!(utilization.band, UtilizationBand::High);

    let normal = vec![record("LNK", "Uzbekistan", "2020-05-01", 16.0)];
    assert_eq!(
        calculate_capacity_utilization(&normal).unwrap().band,
        UtilizationBand::Normal
    );

    let low = vec![record("LNK", "Uzbekistan", "2020-05-01", 3.2)];
    assert_eq!(
        calculate_capacity_utilization(&low).unwrap().band,
        UtilizationBand::Low
    );
}

#[test]
fn test_capacity_utilization_requires_known_capacity() {
    assert!(calculate_capacity_utilization(&[]).is_none());
    assert!(calculate_capacity_utilization(&[uncapped("2020-05-01", 3.0)]).is_none());
}
