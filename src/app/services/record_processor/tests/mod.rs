//! Tests for record processor module

pub mod processor_tests;

// Test helper functions and fixtures
use crate::app::models::{DischargeRecord, RecordFields};
use crate::app::services::record_processor::validation::validate_discharge;
use chrono::NaiveDate;

/// Create a record the way the builder would, validation included
pub fn create_test_record(
    object_code: &str,
    country: &str,
    date: &str,
    value: f64,
    source_file: &str,
) -> DischargeRecord {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    let fields = RecordFields {
        segment: "Upper".to_string(),
        object_code: object_code.to_string(),
        object_name: format!("Canal {}", object_code),
        country: country.to_string(),
        parameter: "discharge".to_string(),
        source_file: source_file.to_string(),
    };
    DischargeRecord::new(fields, date, value, validate_discharge(object_code, value))
}
