//! Catalog of distinct values present in a record set
//!
//! Drives selection controls: which countries, segments and canal objects
//! exist, and which years the data covers. Nothing here filters records for
//! aggregation; that stays with the consumer.

use crate::app::models::{CatalogSummary, DischargeRecord, ObjectEntry};
use crate::constants::ALL_COUNTRIES;
use std::collections::{BTreeMap, BTreeSet};

/// Summarize the distinct countries, segments, objects and year range
///
/// For an empty record set all collections are empty and both year bounds
/// are `None`.
pub fn extract_catalog(records: &[DischargeRecord]) -> CatalogSummary {
    let countries: BTreeSet<&str> = records
        .iter()
        .map(|r| r.country().code.as_str())
        .filter(|c| *c != ALL_COUNTRIES)
        .collect();
    let segments: BTreeSet<&str> = records.iter().map(|r| r.segment().code.as_str()).collect();

    CatalogSummary {
        countries: countries.into_iter().map(String::from).collect(),
        segments: segments.into_iter().map(String::from).collect(),
        objects: distinct_objects(records.iter()),
        min_year: records.iter().map(|r| r.year()).min(),
        max_year: records.iter().map(|r| r.year()).max(),
    }
}

/// Countries that report data for an object, sorted, without the "all" total
pub fn countries_for_object(records: &[DischargeRecord], object_code: &str) -> Vec<String> {
    let countries: BTreeSet<&str> = records
        .iter()
        .filter(|r| r.object_code() == object_code)
        .map(|r| r.country().code.as_str())
        .filter(|c| *c != ALL_COUNTRIES)
        .collect();
    countries.into_iter().map(String::from).collect()
}

/// Objects within a segment, sorted by name; an empty segment means all
pub fn objects_for_segment(records: &[DischargeRecord], segment: &str) -> Vec<ObjectEntry> {
    if segment.is_empty() {
        distinct_objects(records.iter())
    } else {
        distinct_objects(records.iter().filter(|r| r.segment().code == segment))
    }
}

/// Distinct objects keyed by code, sorted by display name
///
/// When one code appears with several names the last one seen wins.
fn distinct_objects<'a>(records: impl Iterator<Item = &'a DischargeRecord>) -> Vec<ObjectEntry> {
    let mut by_code: BTreeMap<&str, &str> = BTreeMap::new();
    for record in records {
        by_code.insert(record.object_code(), record.object_name());
    }

    let mut objects: Vec<ObjectEntry> = by_code
        .into_iter()
        .map(|(code, name)| ObjectEntry {
            code: code.to_string(),
            name: name.to_string(),
        })
        .collect();
    // Case-insensitive by name; exact name and code break ties
    objects.sort_by_cached_key(|o| (o.name.to_lowercase(), o.name.clone(), o.code.clone()));
    objects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{RecordFields, ValidationVerdict};
    use chrono::NaiveDate;

    fn record(segment: &str, code: &str, name: &str, country: &str, date: &str) -> DischargeRecord {
        let fields = RecordFields {
            segment: segment.to_string(),
            object_code: code.to_string(),
            object_name: name.to_string(),
            country: country.to_string(),
            parameter: "discharge".to_string(),
            source_file: "f.xlsx".to_string(),
        };
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        DischargeRecord::new(fields, date, 1.0, ValidationVerdict::Valid)
    }

    fn fixture() -> Vec<DischargeRecord> {
        vec![
            record("Upper", "LNK", "Left canal", "Uzbekistan", "2019-05-01"),
            record("Upper", "LNK", "Left canal", "Tajikistan", "2021-05-01"),
            record("Upper", "BNK", "Big canal", "all", "2020-05-01"),
            record("Lower", "DUS", "Dustlik", "Kazakhstan", "2018-01-01"),
        ]
    }

    #[test]
    fn test_extract_catalog() {
        let catalog = extract_catalog(&fixture());

        assert_eq!(catalog.countries, vec!["Kazakhstan", "Tajikistan", "Uzbekistan"]);
        assert_eq!(catalog.segments, vec!["Lower", "Upper"]);
        let names: Vec<&str> = catalog.objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Big canal", "Dustlik", "Left canal"]);
        assert_eq!(catalog.min_year, Some(2018));
        assert_eq!(catalog.max_year, Some(2021));
    }

    #[test]
    fn test_objects_sorted_ignoring_case() {
        let records = vec![
            record("Upper", "ZAR", "Zardara", "all", "2020-05-01"),
            record("Upper", "APL", "apple canal", "all", "2020-05-01"),
            record("Upper", "BNK", "Big canal", "all", "2020-05-01"),
            record("Upper", "BN2", "big canal", "all", "2020-05-01"),
        ];

        let catalog = extract_catalog(&records);
        let names: Vec<&str> = catalog.objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["apple canal", "Big canal", "big canal", "Zardara"]);
    }

    #[test]
    fn test_extract_catalog_empty() {
        let catalog = extract_catalog(&[]);

        assert!(catalog.countries.is_empty());
        assert!(catalog.segments.is_empty());
        assert!(catalog.objects.is_empty());
        assert_eq!(catalog.min_year, None);
        assert_eq!(catalog.max_year, None);
    }

    #[test]
    fn test_countries_for_object() {
        let records = fixture();

        assert_eq!(countries_for_object(&records, "LNK"), vec!["Tajikistan", "Uzbekistan"]);
        assert!(countries_for_object(&records, "BNK").is_empty());
        assert!(countries_for_object(&records, "NONE").is_empty());
    }

    #[test]
    fn test_objects_for_segment() {
        let records = fixture();

        let upper = objects_for_segment(&records, "Upper");
        let codes: Vec<&str> = upper.iter().map(|o| o.code.as_str()).collect();
        assert_eq!(codes, vec!["BNK", "LNK"]);

        assert_eq!(objects_for_segment(&records, "").len(), 3);
        assert!(objects_for_segment(&records, "Middle").is_empty());
    }
}
