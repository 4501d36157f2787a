//! Property-based tests for rmfpack.
//!
//! These tests generate random inputs to find edge cases.

use std::borrow::Cow;

use proptest::prelude::*;

use rmfpack::Record;
use rmfpack::core::filter::{FilterCriteria, apply_filters, filter_records};
use rmfpack::core::metadata::Metadata;
use rmfpack::core::output::{csv_row, to_csv};
use rmfpack::core::series::build_series;
use rmfpack::scanner::scan_report;

/// Fast strategies: select from fixed pools instead of regex generation.
fn arb_record() -> impl Strategy<Value = Record> {
    (
        prop::sample::select(vec!["BATCH", "STC", "ONLINE", "A,B", "Q\"T", "line\nbreak"]),
        prop::sample::select(vec!["PROD", "SYSSTC", "TSOHI", "prod"]),
        1u32..5,
        0.0f64..500.0,
        prop::sample::select(vec!["RMFW0001.txt", "RMFW0002.txt", "odd, name.txt"]),
        prop::option::of((0u32..28, 0u32..24, 0u32..4)),
    )
        .prop_map(|(workload, class, period, appl, source, ts)| {
            let rec = Record::new(workload, class, period, appl, source);
            match ts {
                Some((day, hour, quarter)) => {
                    let display = format!("01/{:02}/2024 {:02}.{:02}.00", day + 1, hour, quarter * 15);
                    let iso = format!("2024-01-{:02}T{:02}:{:02}:00.000Z", day + 1, hour, quarter * 15);
                    rec.with_timestamp(display, iso)
                }
                None => rec,
            }
        })
}

fn arb_records(max_len: usize) -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(arb_record(), 0..max_len)
}

fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
    (
        prop::option::of(prop::sample::select(vec!["BATCH", "STC", ""])),
        prop::option::of(prop::sample::select(vec!["PROD", "SYSSTC"])),
        prop::option::of(prop::sample::select(vec![
            "2024-01-05T00:00:00.000Z",
            "2024-01-15T12:00:00.000Z",
            "",
        ])),
        prop::option::of(prop::sample::select(vec!["2024-01-20T23:59:59.999Z", ""])),
    )
        .prop_map(|(workload, class, start, end)| FilterCriteria {
            workload: workload.map(String::from),
            service_class: class.map(String::from),
            file_source: None,
            start_date: start.map(String::from),
            end_date: end.map(String::from),
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================
    // FILTER PROPERTIES
    // ============================================

    /// No criteria is the identity
    #[test]
    fn filter_none_is_identity(records in arb_records(30)) {
        let view = filter_records(&records, None);
        prop_assert!(matches!(view, Cow::Borrowed(_)));
        prop_assert_eq!(&*view, records.as_slice());
    }

    /// Filtered view is an order-preserving subsequence where every record matches
    #[test]
    fn filter_is_matching_subsequence(records in arb_records(30), criteria in arb_criteria()) {
        let view = apply_filters(&records, &criteria);
        prop_assert!(view.len() <= records.len());
        prop_assert!(view.iter().all(|r| criteria.matches(r)));

        let expected: Vec<&Record> = records.iter().filter(|r| criteria.matches(r)).collect();
        let actual: Vec<&Record> = view.iter().collect();
        prop_assert_eq!(actual, expected);
    }

    /// Filtering twice with the same criteria changes nothing
    #[test]
    fn filter_is_idempotent(records in arb_records(30), criteria in arb_criteria()) {
        let once = apply_filters(&records, &criteria).into_owned();
        let twice = apply_filters(&once, &criteria).into_owned();
        prop_assert_eq!(once, twice);
    }

    /// Date bounds exclude untimed records
    #[test]
    fn date_filter_excludes_untimed(records in arb_records(30)) {
        let criteria = FilterCriteria::new().with_start("2000-01-01T00:00:00.000Z");
        let view = apply_filters(&records, &criteria);
        prop_assert!(view.iter().all(Record::has_timestamp));
        prop_assert_eq!(view.len(), records.iter().filter(|r| r.has_timestamp()).count());
    }

    // ============================================
    // METADATA PROPERTIES
    // ============================================

    /// min <= max, and both are actual timestamps of the set
    #[test]
    fn metadata_date_range_bounds(records in arb_records(30)) {
        let meta = Metadata::from_records(&records);
        let stamps: Vec<&str> = records.iter().filter_map(Record::iso_time).collect();

        match (meta.date_range.min.as_deref(), meta.date_range.max.as_deref()) {
            (Some(min), Some(max)) => {
                prop_assert!(min <= max);
                prop_assert!(stamps.contains(&min));
                prop_assert!(stamps.contains(&max));
                prop_assert!(stamps.iter().all(|ts| min <= *ts && *ts <= max));
            }
            (None, None) => prop_assert!(stamps.is_empty()),
            _ => prop_assert!(false, "date range bounds must be both set or both unset"),
        }
    }

    /// Facets are sorted, distinct and cover every record
    #[test]
    fn metadata_facets_sorted_and_complete(records in arb_records(30)) {
        let meta = Metadata::from_records(&records);
        prop_assert_eq!(meta.total_records, records.len());
        prop_assert!(meta.workloads.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(meta.service_classes.windows(2).all(|w| w[0] < w[1]));
        for r in &records {
            prop_assert!(meta.workloads.contains(&r.workload));
            prop_assert!(meta.service_classes.contains(&r.service_class));
            prop_assert!(meta.file_sources.contains(&r.file_source));
        }
    }

    // ============================================
    // CSV PROPERTIES
    // ============================================

    /// CSV parsing recovers every cell exactly
    #[test]
    fn csv_round_trip(records in arb_records(20)) {
        let text = to_csv(&records).unwrap();
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();

        prop_assert_eq!(rows.len(), records.len());
        for (row, record) in rows.iter().zip(&records) {
            let cells: Vec<&str> = row.iter().collect();
            let expected = csv_row(record);
            let expected: Vec<&str> = expected.iter().map(String::as_str).collect();
            prop_assert_eq!(cells, expected);
        }
    }

    /// The percentage cell parses back to the same float
    #[test]
    fn csv_percentage_round_trip(appl in 0.0f64..1000.0) {
        let rec = Record::new("W", "C", 1, appl, "f");
        let cell = &csv_row(&rec)[4];
        prop_assert_eq!(cell.parse::<f64>().unwrap(), appl);
    }

    // ============================================
    // SERIES PROPERTIES
    // ============================================

    /// Every timed record lands in exactly one series, points ordered by x
    #[test]
    fn series_partition_timed_records(records in arb_records(30)) {
        let series = build_series(&records);
        let points: usize = series.iter().map(|s| s.points.len()).sum();
        prop_assert_eq!(points, records.iter().filter(|r| r.has_timestamp()).count());
        for s in &series {
            prop_assert!(s.points.windows(2).all(|w| w[0].x <= w[1].x));
        }
        prop_assert!(series.windows(2).all(|w| w[0].label < w[1].label));
    }

    // ============================================
    // SCANNER PROPERTIES
    // ============================================

    /// Arbitrary text never panics, and each record needs a total line
    #[test]
    fn scanner_never_panics(text in "[ A-Z0-9=./\\-\n]{0,400}") {
        let records = scan_report(&text, "fuzz.txt");
        prop_assert!(records.len() <= text.matches("TOTAL").count());
    }

    /// One record per non-zero block
    #[test]
    fn scanner_counts_blocks(blocks in prop::collection::vec((any::<bool>(), 1u32..9, 0u32..10000), 0..20)) {
        let mut text = String::from("START 01/15/2024-08.30.00 INTERVAL 000.15.00\n");
        for (zero, period, hundredths) in &blocks {
            text.push_str(&format!("WORKLOAD=BATCH SERVICE CLASS=PROD RESOURCE GROUP=*NONE PERIOD={period}\n"));
            if *zero {
                text.push_str("   ALL DATA ZERO\n");
            } else {
                text.push_str(&format!(" AVG 1.00 ACTUAL 0 TOTAL {}.{:02}\n", hundredths / 100, hundredths % 100));
            }
        }
        let records = scan_report(&text, "RMFW0001.txt");
        prop_assert_eq!(records.len(), blocks.iter().filter(|(zero, _, _)| !zero).count());
    }
}
