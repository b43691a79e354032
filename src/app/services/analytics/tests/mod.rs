//! Tests for the analytics module

pub mod country_share_tests;
pub mod period_tests;
pub mod seasonal_tests;

use crate::app::models::{DischargeRecord, RecordFields};
use crate::app::services::record_processor::validate_discharge;
use chrono::NaiveDate;

/// Create a validated record for an object and country on a date
pub fn record(object_code: &str, country: &str, date: &str, value: f64) -> DischargeRecord {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    let fields = RecordFields {
        segment: "Middle".to_string(),
        object_code: object_code.to_string(),
        object_name: format!("Canal {}", object_code),
        country: country.to_string(),
        parameter: "discharge".to_string(),
        source_file: "fixture.xlsx".to_string(),
    };
    DischargeRecord::new(fields, date, value, validate_discharge(object_code, value))
}

/// Records for an object without a rated capacity
pub fn uncapped(date: &str, value: f64) -> DischargeRecord {
    record("FREE", "Uzbekistan", date, value)
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
