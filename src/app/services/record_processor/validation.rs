//! Physical plausibility checks for discharge values
//!
//! Validation only labels records. Flagged records stay in the record set and
//! are excluded later by the aggregators.

use crate::app::models::ValidationVerdict;
use crate::constants::{CAPACITY_TOLERANCE, capacity_for};

/// Classify a discharge value for a canal object
///
/// Rules, first match wins:
/// 1. negative values are invalid
/// 2. values strictly above the rated capacity plus tolerance are invalid
/// 3. everything else is valid, including objects with no known capacity
pub fn validate_discharge(object_code: &str, value: f64) -> ValidationVerdict {
    if value < 0.0 {
        return ValidationVerdict::Invalid {
            reason: "negative value".to_string(),
        };
    }

    if let Some(capacity) = capacity_for(object_code) {
        if exceeds_capacity(value, capacity) {
            return ValidationVerdict::Invalid {
                reason: format!("exceeds rated canal capacity (max: {} m³/s)", capacity),
            };
        }
    }

    ValidationVerdict::Valid
}

/// Whether a value is above the tolerated maximum for a rated capacity
pub fn exceeds_capacity(value: f64, capacity: f64) -> bool {
    value > capacity * CAPACITY_TOLERANCE
}
