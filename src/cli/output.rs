//! Rendering of command results
//!
//! Every report is a serializable struct. Table output is built as a string
//! so it can be tested; JSON output goes through `serde_json`.

use crate::app::models::{
    CapacityUtilization, CatalogSummary, CountryShare, MultiYearAverage, ObjectEntry,
    PeriodComparison, SeasonalAnalytics, Trend, UtilizationBand, YearlyComparison,
};
use crate::app::services::discharge_store::Snapshot;
use crate::constants::{country_display_name, segment_display_name};
use crate::{Error, Result};
use colored::*;
use serde::Serialize;
use std::fmt::Write;

// =============================================================================
// Number formatting
// =============================================================================

/// Fixed-decimal formatting with space-separated thousands, e.g. `1 234 567.89`
pub fn format_number(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value);
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

// =============================================================================
// Reports
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogReport {
    pub summary: CatalogSummary,
    /// Objects of the selected segment, when `--segment` was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_objects: Option<Vec<ObjectEntry>>,
    /// Countries reporting the selected object, when `--object` was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_countries: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalReport {
    pub vegetation: SeasonalAnalytics,
    pub non_vegetation: SeasonalAnalytics,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyReport {
    pub years: Vec<YearlyComparison>,
    pub multi_year_average: Option<MultiYearAverage>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    pub period: Option<PeriodComparison>,
    pub utilization: Option<CapacityUtilization>,
}

/// Serialize any report as pretty JSON
pub fn to_json<T: Serialize>(report: &T) -> Result<String> {
    serde_json::to_string_pretty(report)
        .map_err(|e| Error::configuration(format!("Failed to serialize report: {}", e)))
}

// =============================================================================
// Table rendering
// =============================================================================

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", title.bold());
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
}

pub fn render_load_summary(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} records loaded at {}",
        "✓".green(),
        format_number(snapshot.record_count() as f64, 0),
        snapshot.loaded_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let stats = &snapshot.parse_stats;
    if stats.rows_rejected > 0 || stats.invalid_records > 0 {
        let _ = writeln!(
            out,
            "  {} rows discarded, {} records flagged invalid, {} duplicates removed",
            stats.rows_rejected, stats.invalid_records, snapshot.dedup_stats.duplicates_removed
        );
    }
    out
}

pub fn render_catalog(report: &CatalogReport) -> String {
    let mut out = String::new();
    let summary = &report.summary;

    heading(&mut out, "Catalog");
    match (summary.min_year, summary.max_year) {
        (Some(min), Some(max)) => {
            let _ = writeln!(out, "Years:     {} - {}", min, max);
        }
        _ => {
            let _ = writeln!(out, "Years:     {}", "no data".dimmed());
        }
    }

    let _ = writeln!(out, "\nCountries ({}):", summary.countries.len());
    for country in &summary.countries {
        let _ = writeln!(out, "  {:<16} {}", country, country_display_name(country));
    }

    let _ = writeln!(out, "\nSegments ({}):", summary.segments.len());
    for segment in &summary.segments {
        let _ = writeln!(out, "  {:<16} {}", segment, segment_display_name(segment));
    }

    let objects = report.segment_objects.as_ref().unwrap_or(&summary.objects);
    let _ = writeln!(out, "\nObjects ({}):", objects.len());
    for object in objects {
        let _ = writeln!(out, "  {:<16} {}", object.code, object.name);
    }

    if let Some(countries) = &report.object_countries {
        let _ = writeln!(out, "\nCountries reporting this object: {}", countries.join(", "));
    }
    out
}

fn seasonal_row(out: &mut String, label: &str, s: &SeasonalAnalytics) {
    let _ = writeln!(
        out,
        "{:<16} {:>16} {:>10} {:>10} {:>10} {:>6} {:>8}",
        label,
        format_number(s.total_volume_million, 2),
        format_number(s.avg_discharge, 2),
        format_number(s.max_discharge, 2),
        format_number(s.min_discharge, 2),
        s.days_count,
        format_number(s.variability_index, 2),
    );
}

pub fn render_seasonal(report: &SeasonalReport) -> String {
    let mut out = String::new();
    heading(&mut out, "Seasonal analytics");
    let _ = writeln!(
        out,
        "{:<16} {:>16} {:>10} {:>10} {:>10} {:>6} {:>8}",
        "Season", "Volume (mln m³)", "Avg m³/s", "Max m³/s", "Min m³/s", "Days", "Var."
    );
    seasonal_row(&mut out, "Vegetation", &report.vegetation);
    seasonal_row(&mut out, "Non-vegetation", &report.non_vegetation);
    out
}

pub fn render_yearly(report: &YearlyReport) -> String {
    let mut out = String::new();
    heading(&mut out, "Yearly comparison");

    if report.years.is_empty() {
        let _ = writeln!(out, "{}", "No records match the filters".dimmed());
        return out;
    }

    let _ = writeln!(
        out,
        "{:<6} {:>14} {:>14} {:>14} {:>10}",
        "Year", "Veg. mln m³", "Non-veg. mln m³", "Total mln m³", "Season k"
    );
    for year in &report.years {
        let _ = writeln!(
            out,
            "{:<6} {:>14} {:>14} {:>14} {:>10}",
            year.year,
            format_number(year.vegetation.total_volume_million, 2),
            format_number(year.non_vegetation.total_volume_million, 2),
            format_number(year.total_annual, 2),
            format_number(year.seasonality_coefficient, 2),
        );
    }

    if let Some(avg) = &report.multi_year_average {
        let _ = writeln!(out, "\nAverage over {} years:", avg.years);
        let _ = writeln!(
            out,
            "  Vegetation:     {} mln m³, {} m³/s",
            format_number(avg.vegetation.avg_volume, 2),
            format_number(avg.vegetation.avg_discharge, 2)
        );
        let _ = writeln!(
            out,
            "  Non-vegetation: {} mln m³, {} m³/s",
            format_number(avg.non_vegetation.avg_volume, 2),
            format_number(avg.non_vegetation.avg_discharge, 2)
        );
    }
    out
}

pub fn render_country_share(shares: &[CountryShare]) -> String {
    let mut out = String::new();
    heading(&mut out, "Country share");

    if shares.is_empty() {
        let _ = writeln!(out, "{}", "No records match the filters".dimmed());
        return out;
    }

    let _ = writeln!(out, "{:<24} {:>16} {:>8}", "Country", "Volume (mln m³)", "Share");
    for share in shares {
        let _ = writeln!(
            out,
            "{:<24} {:>16} {:>7}%",
            country_display_name(&share.country),
            format_number(share.volume, 2),
            format_number(share.percentage, 1),
        );
    }
    out
}

pub fn render_trend(report: &TrendReport) -> String {
    let mut out = String::new();
    heading(&mut out, "Trend");

    match &report.period {
        Some(p) => {
            let trend = match p.trend {
                Trend::Increase => "increase".green(),
                Trend::Decrease => "decrease".red(),
                Trend::Stable => "stable".normal(),
            };
            let _ = writeln!(
                out,
                "First half  {} .. {}: {} m³/s over {} days",
                p.first.start,
                p.first.end,
                format_number(p.first.avg_discharge, 2),
                p.first.measurements
            );
            let _ = writeln!(
                out,
                "Second half {} .. {}: {} m³/s over {} days",
                p.second.start,
                p.second.end,
                format_number(p.second.avg_discharge, 2),
                p.second.measurements
            );
            let _ = writeln!(out, "Change: {}% ({})", format_number(p.percent_change, 1), trend);
        }
        None => {
            let _ = writeln!(out, "{}", "Not enough records to compare periods".dimmed());
        }
    }

    if let Some(u) = &report.utilization {
        let band = match u.band {
            UtilizationBand::High => "high".red(),
            UtilizationBand::Low => "low".yellow(),
            UtilizationBand::Normal => "normal".green(),
        };
        let _ = writeln!(
            out,
            "Capacity utilization of {}: {} of {} m³/s = {}% ({})",
            u.object_code,
            format_number(u.avg_discharge, 2),
            format_number(u.capacity, 0),
            format_number(u.utilization_percent, 1),
            band
        );
    }
    out
}
