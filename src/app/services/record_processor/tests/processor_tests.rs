//! Tests for the record processor and its statistics

use super::*;
use crate::app::services::record_processor::RecordProcessor;
use crate::app::services::record_processor::stats::DeduplicationStats;

#[test]
fn test_process_records_reports_stats() {
    let records = vec![
        create_test_record("LNK", "Uzbekistan", "2020-04-01", 10.0, "a.xlsx"),
        create_test_record("LNK", "Uzbekistan", "2020-04-01", 10.0, "b.xlsx"),
        create_test_record("LNK", "Uzbekistan", "2020-04-02", 40.0, "a.xlsx"),
    ];

    let result = RecordProcessor::new().process_records(records);

    assert_eq!(result.record_count(), 2);
    assert_eq!(result.invalid_count(), 1);
    assert_eq!(result.stats.input, 3);
    assert_eq!(result.stats.output, 2);
    assert_eq!(result.stats.duplicates_removed, 1);
}

#[test]
fn test_process_empty_input() {
    let result = RecordProcessor::new().process_records(Vec::new());

    assert_eq!(result.record_count(), 0);
    assert_eq!(result.stats.reduction_percentage(), 0.0);
}

#[test]
fn test_reduction_percentage() {
    let stats = DeduplicationStats {
        input: 200,
        output: 150,
        duplicates_removed: 50,
        ..Default::default()
    };

    assert_eq!(stats.reduction_percentage(), 25.0);
    assert!(stats.summary().contains("200 -> 150"));
}
