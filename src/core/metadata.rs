//! Facet values and date bounds for a record set.
//!
//! [`Metadata`] is what a dashboard needs to populate its filter controls:
//! the distinct workloads, service classes and source files, the covered
//! date range, and the statistics of the run that produced the records. It
//! is a pure function of its inputs and must be recomputed whenever the
//! record set changes.
//!
//! # Example
//!
//! ```
//! use rmfpack::core::metadata::Metadata;
//! use rmfpack::Record;
//!
//! let records = vec![
//!     Record::new("STC", "SYSSTC", 1, 2.0, "b.txt")
//!         .with_timestamp("01/15/2024 09.00.00", "2024-01-15T09:00:00.000Z"),
//!     Record::new("BATCH", "PROD", 1, 40.0, "a.txt")
//!         .with_timestamp("01/15/2024 08.30.00", "2024-01-15T08:30:00.000Z"),
//! ];
//!
//! let meta = Metadata::from_records(&records);
//! assert_eq!(meta.workloads, ["BATCH", "STC"]);
//! assert_eq!(meta.date_range.min.as_deref(), Some("2024-01-15T08:30:00.000Z"));
//! assert_eq!(meta.date_range.max.as_deref(), Some("2024-01-15T09:00:00.000Z"));
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::Record;
use crate::core::aggregate::ParseStats;

/// Earliest and latest `timestamp_iso` in a record set.
///
/// Both bounds are `None` when no record carries a timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub min: Option<String>,
    pub max: Option<String>,
}

/// Derived summary of a record set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Distinct workloads, ascending.
    pub workloads: Vec<String>,
    /// Distinct service classes, ascending.
    pub service_classes: Vec<String>,
    /// Distinct source files, ascending.
    pub file_sources: Vec<String>,
    /// Covered interval range.
    pub date_range: DateRange,
    /// Number of records.
    pub total_records: usize,
    /// Statistics of the run that produced the records.
    pub parse_stats: ParseStats,
}

impl Metadata {
    /// Derives metadata with empty parse statistics.
    pub fn from_records(records: &[Record]) -> Self {
        derive_metadata(records, ParseStats::default())
    }
}

/// Derives [`Metadata`] from records and the statistics of their run.
///
/// Facets use exact, case-sensitive string equality and ascending code-point
/// order. Date bounds compare ISO strings lexicographically.
pub fn derive_metadata(records: &[Record], parse_stats: ParseStats) -> Metadata {
    let mut workloads = BTreeSet::new();
    let mut service_classes = BTreeSet::new();
    let mut file_sources = BTreeSet::new();
    let mut min: Option<&str> = None;
    let mut max: Option<&str> = None;

    for record in records {
        workloads.insert(record.workload.as_str());
        service_classes.insert(record.service_class.as_str());
        file_sources.insert(record.file_source.as_str());

        if let Some(ts) = record.iso_time() {
            if min.is_none_or(|m| ts < m) {
                min = Some(ts);
            }
            if max.is_none_or(|m| ts > m) {
                max = Some(ts);
            }
        }
    }

    Metadata {
        workloads: to_owned_sorted(workloads),
        service_classes: to_owned_sorted(service_classes),
        file_sources: to_owned_sorted(file_sources),
        date_range: DateRange {
            min: min.map(str::to_string),
            max: max.map(str::to_string),
        },
        total_records: records.len(),
        parse_stats,
    }
}

fn to_owned_sorted(set: BTreeSet<&str>) -> Vec<String> {
    set.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(workload: &str, class: &str, source: &str, iso: Option<&str>) -> Record {
        let r = Record::new(workload, class, 1, 1.0, source);
        match iso {
            Some(ts) => r.with_timestamp(ts, ts),
            None => r,
        }
    }

    #[test]
    fn test_empty() {
        let meta = Metadata::from_records(&[]);
        assert_eq!(meta.date_range, DateRange { min: None, max: None });
        assert_eq!(meta.total_records, 0);
        assert!(meta.workloads.is_empty());
    }

    #[test]
    fn test_facets_distinct_and_sorted() {
        let records = vec![
            rec("batch", "PROD", "b.txt", None),
            rec("BATCH", "PROD", "a.txt", None),
            rec("BATCH", "DEV", "a.txt", None),
        ];
        let meta = Metadata::from_records(&records);
        // Uppercase sorts before lowercase in code-point order.
        assert_eq!(meta.workloads, ["BATCH", "batch"]);
        assert_eq!(meta.service_classes, ["DEV", "PROD"]);
        assert_eq!(meta.file_sources, ["a.txt", "b.txt"]);
        assert_eq!(meta.total_records, 3);
    }

    #[test]
    fn test_date_range_ignores_missing() {
        let records = vec![
            rec("W", "C", "f", Some("2024-01-15T08:45:00.000Z")),
            rec("W", "C", "f", None),
            rec("W", "C", "f", Some("2024-01-15T08:30:00.000Z")),
        ];
        let meta = Metadata::from_records(&records);
        assert_eq!(meta.date_range.min.as_deref(), Some("2024-01-15T08:30:00.000Z"));
        assert_eq!(meta.date_range.max.as_deref(), Some("2024-01-15T08:45:00.000Z"));
    }

    #[test]
    fn test_all_missing_timestamps() {
        let meta = Metadata::from_records(&[rec("W", "C", "f", None)]);
        assert_eq!(meta.date_range, DateRange::default());
        assert_eq!(meta.total_records, 1);
    }

    #[test]
    fn test_parse_stats_carried() {
        let stats = ParseStats {
            files_parsed: 3,
            files_failed: 1,
            ..ParseStats::default()
        };
        let meta = derive_metadata(&[], stats.clone());
        assert_eq!(meta.parse_stats, stats);
    }

    #[test]
    fn test_json_shape() {
        let value = serde_json::to_value(Metadata::from_records(&[])).unwrap();
        assert!(value["date_range"]["min"].is_null());
        assert!(value["date_range"]["max"].is_null());
        assert_eq!(value["total_records"], 0);
        assert!(value["parse_stats"].is_object());
    }
}
