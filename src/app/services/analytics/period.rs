//! Period comparison and capacity utilization
//!
//! Both operate on the subset as displayed, so unlike the seasonal
//! statistics they average every record, flagged or not.

use crate::app::models::{
    CapacityUtilization, DischargeRecord, PeriodComparison, PeriodSummary, Trend, UtilizationBand,
};
use crate::constants::{STABLE_CHANGE_PERCENT, capacity_for, utilization};

fn average(records: &[&DischargeRecord]) -> f64 {
    if records.is_empty() {
        0.0
    } else {
        records.iter().map(|r| r.value()).sum::<f64>() / records.len() as f64
    }
}

fn summarize(records: &[&DischargeRecord]) -> Option<PeriodSummary> {
    let first = records.first()?;
    let last = records.last()?;
    Some(PeriodSummary {
        start: first.date(),
        end: last.date(),
        avg_discharge: average(records),
        measurements: records.len(),
    })
}

/// Compare average discharge of the first and second chronological halves
///
/// The split point is `len / 2`, so the second half gets the extra record
/// for odd lengths. Returns `None` for fewer than two records.
pub fn compare_periods(records: &[DischargeRecord]) -> Option<PeriodComparison> {
    if records.len() < 2 {
        return None;
    }

    let mut sorted: Vec<&DischargeRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.date());

    let (first_half, second_half) = sorted.split_at(sorted.len() / 2);
    let first = summarize(first_half)?;
    let second = summarize(second_half)?;

    let percent_change = if first.avg_discharge != 0.0 {
        (second.avg_discharge - first.avg_discharge) / first.avg_discharge * 100.0
    } else {
        0.0
    };

    let trend = if percent_change.abs() < STABLE_CHANGE_PERCENT {
        Trend::Stable
    } else if percent_change > 0.0 {
        Trend::Increase
    } else {
        Trend::Decrease
    };

    Some(PeriodComparison {
        first,
        second,
        percent_change,
        trend,
    })
}

/// Average discharge relative to the rated capacity of the subset's object
///
/// The object is taken from the first record. Returns `None` for an empty
/// subset or an object without a known capacity.
pub fn calculate_capacity_utilization(records: &[DischargeRecord]) -> Option<CapacityUtilization> {
    let object_code = records.first()?.object_code();
    let capacity = capacity_for(object_code)?;

    let avg_discharge = records.iter().map(|r| r.value()).sum::<f64>() / records.len() as f64;
    let utilization_percent = avg_discharge / capacity * 100.0;

    let band = if utilization_percent > utilization::HIGH_ABOVE {
        UtilizationBand::High
    } else if utilization_percent < utilization::LOW_BELOW {
        UtilizationBand::Low
    } else {
        UtilizationBand::Normal
    };

    Some(CapacityUtilization {
        object_code: object_code.to_string(),
        capacity,
        avg_discharge,
        utilization_percent,
        band,
    })
}
