//! Construction of discharge records from split feed rows
//!
//! The builder maps positional fields onto a `DischargeRecord`, runs the
//! capacity validator and applies the configured policy for fields that fail
//! to parse.

use super::field_parsers::{FieldOutcome, field_or_empty, parse_date, parse_value};
use crate::app::models::{DischargeRecord, RecordFields};
use crate::app::services::record_processor::validation::validate_discharge;
use crate::config::ValuePolicy;
use crate::constants::{MIN_FIELD_COUNT, columns};
use tracing::debug;

/// Why a row did not produce a record
#[derive(Debug, Clone, PartialEq)]
pub enum RowRejection {
    /// Fewer than the required number of fields after splitting
    TooFewFields { found: usize },
    /// The date column could not be parsed
    UnparsableDate { raw: String, reason: String },
    /// The value column could not be parsed and the policy rejects such rows
    UnparsableValue { raw: String, reason: String },
}

/// Result of building one row, with a note when the value was coerced
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltRecord {
    pub record: DischargeRecord,
    /// True when an unparsable value was replaced by zero
    pub value_coerced: bool,
}

/// Builds records from split rows under a fixed value policy
#[derive(Debug, Clone, Copy)]
pub struct RecordBuilder {
    value_policy: ValuePolicy,
}

impl RecordBuilder {
    pub fn new(value_policy: ValuePolicy) -> Self {
        Self { value_policy }
    }

    pub fn value_policy(&self) -> ValuePolicy {
        self.value_policy
    }

    /// Build a record from one split row
    pub fn build(&self, fields: &[String]) -> Result<BuiltRecord, RowRejection> {
        if fields.len() < MIN_FIELD_COUNT {
            return Err(RowRejection::TooFewFields {
                found: fields.len(),
            });
        }

        let date = match parse_date(field_or_empty(fields, columns::DATE)) {
            FieldOutcome::Parsed(date) => date,
            FieldOutcome::Failed { raw, reason } => {
                return Err(RowRejection::UnparsableDate { raw, reason });
            }
        };

        let (value, value_coerced) = match parse_value(field_or_empty(fields, columns::VALUE)) {
            FieldOutcome::Parsed(value) => (value, false),
            FieldOutcome::Failed { raw, reason } => match self.value_policy {
                ValuePolicy::ZeroFill => {
                    debug!("Coercing unparsable value '{}' to 0 ({})", raw, reason);
                    (0.0, true)
                }
                ValuePolicy::RejectRow => {
                    return Err(RowRejection::UnparsableValue { raw, reason });
                }
            },
        };

        let object_code = field_or_empty(fields, columns::OBJECT_CODE);
        let verdict = validate_discharge(object_code, value);

        let record_fields = RecordFields {
            segment: field_or_empty(fields, columns::SEGMENT).to_string(),
            object_code: object_code.to_string(),
            object_name: field_or_empty(fields, columns::OBJECT_NAME).to_string(),
            country: field_or_empty(fields, columns::COUNTRY).to_string(),
            parameter: field_or_empty(fields, columns::PARAMETER).to_string(),
            source_file: field_or_empty(fields, columns::SOURCE_FILE).to_string(),
        };

        Ok(BuiltRecord {
            record: DischargeRecord::new(record_fields, date, value, verdict),
            value_coerced,
        })
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new(ValuePolicy::default())
    }
}
