//! Tests for country volume shares

use super::*;
use crate::app::services::analytics::country_share::calculate_country_share;

#[test]
fn test_empty_input() {
    assert!(calculate_country_share(&[]).is_empty());
}

#[test]
fn test_shares_sum_to_hundred() {
    let records = vec![
        record("FREE", "Uzbekistan", "2020-05-01", 30.0),
        record("FREE", "Uzbekistan", "2020-05-02", 30.0),
        record("FREE", "Tajikistan", "2020-05-01", 20.0),
    ];

    let shares = calculate_country_share(&records);

    assert_eq!(shares.len(), 2);
    assert_eq!(shares[0].country, "Uzbekistan");
    assert_close(shares[0].percentage, 75.0);
    assert_close(shares[1].percentage, 25.0);
    assert_close(shares[0].volume, 60.0 * 86_400.0 / 1_000_000.0);
}

#[test]
fn test_invalid_records_excluded() {
    let records = vec![
        record("LNK", "Uzbekistan", "2020-05-01", 30.0),
        record("LNK", "Kazakhstan", "2020-05-01", 100.0),
    ];

    let shares = calculate_country_share(&records);

    assert_eq!(shares.len(), 1);
    assert_eq!(shares[0].country, "Uzbekistan");
}

#[test]
fn test_zero_total_gives_zero_percentages() {
    let records = vec![record("FREE", "Uzbekistan", "2020-05-01", 0.0)];

    let shares = calculate_country_share(&records);

    assert_eq!(shares.len(), 1);
    assert_eq!(shares[0].percentage, 0.0);
}
