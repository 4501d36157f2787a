//! Tests for output writers: CSV, JSON, JSONL.
//!
//! Exported files are read back with the same crates a consumer would use
//! (`csv::Reader`, `serde_json`) to check that values survive intact.

use std::fs;

use rmfpack::Record;
use rmfpack::core::output::{
    CSV_HEADER, csv_row, rows_to_csv, to_csv, to_json, to_json_view, to_jsonl, write_csv,
    write_json, write_jsonl,
};
use tempfile::tempdir;

fn sample_records() -> Vec<Record> {
    vec![
        Record::new("BATCH", "PROD", 1, 45.67, "RMFW0001.txt")
            .with_timestamp("01/15/2024 08.30.00", "2024-01-15T08:30:00.000Z"),
        Record::new("A,B", "PROD", 2, 50.0, "RMFW0001.txt")
            .with_timestamp("01/15/2024 08.45.00", "2024-01-15T08:45:00.000Z"),
        Record::new("STC", "SYS\"STC\"", 1, 0.5, "odd name.txt"),
    ]
}

fn read_back(csv_text: &str) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let header = reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    (header, rows)
}

// =========================================================================
// CSV
// =========================================================================

#[test]
fn test_csv_round_trip() {
    let records = sample_records();
    let (header, rows) = read_back(&to_csv(&records).unwrap());

    assert_eq!(header, CSV_HEADER);
    assert_eq!(rows.len(), records.len());
    for (row, record) in rows.iter().zip(&records) {
        assert_eq!(row.as_slice(), csv_row(record).as_slice());
    }
    assert_eq!(rows[1][2], "A,B");
    assert_eq!(rows[2][1], "SYS\"STC\"");
}

#[test]
fn test_csv_exact_text() {
    let csv = to_csv(&sample_records()[..2]).unwrap();
    assert_eq!(
        csv,
        "DATE-TIME,SERVICE CLASS,WORKLOAD,PERIOD,APPL % CP,SOURCE FILE\n\
         01/15/2024 08.30.00,PROD,BATCH,1,45.67,RMFW0001.txt\n\
         01/15/2024 08.45.00,PROD,\"A,B\",2,50,RMFW0001.txt\n"
    );
}

#[test]
fn test_csv_untimed_row() {
    let (_, rows) = read_back(&to_csv(&sample_records()[2..]).unwrap());
    assert_eq!(rows[0][0], "");
    assert_eq!(rows[0][4], "0.5");
    assert_eq!(rows[0][5], "odd name.txt");
}

#[test]
fn test_rows_to_csv_preformatted() {
    let rows = vec![[
        "01/15/2024 08.30.00".to_string(),
        "PROD".to_string(),
        "BATCH".to_string(),
        "1".to_string(),
        "45.670".to_string(),
        "RMFW0001.txt".to_string(),
    ]];
    let csv = rows_to_csv(rows).unwrap();
    assert!(csv.ends_with(",45.670,RMFW0001.txt\n"));
}

#[test]
fn test_write_csv_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rmf_report.csv");
    write_csv(&sample_records(), &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("DATE-TIME,"));
    assert_eq!(content.lines().count(), 4);
}

#[test]
fn test_write_csv_bad_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("out.csv");
    let err = write_csv(&sample_records(), &path).unwrap_err();
    assert!(err.is_io());
}

// =========================================================================
// JSON
// =========================================================================

#[test]
fn test_json_envelope_round_trip() {
    let records = sample_records();
    let value: serde_json::Value = serde_json::from_str(&to_json(&records).unwrap()).unwrap();

    assert_eq!(value["count"], 3);
    assert_eq!(value["total"], 3);
    let data: Vec<Record> = serde_json::from_value(value["data"].clone()).unwrap();
    assert_eq!(data, records);
}

#[test]
fn test_json_view_counts() {
    let records = sample_records();
    let value: serde_json::Value =
        serde_json::from_str(&to_json_view(&records[..1], records.len()).unwrap()).unwrap();
    assert_eq!(value["count"], 1);
    assert_eq!(value["total"], 3);
}

#[test]
fn test_json_field_names() {
    let value: serde_json::Value =
        serde_json::from_str(&to_json(&sample_records()[..1]).unwrap()).unwrap();
    let obj = value["data"][0].as_object().unwrap();
    let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        [
            "appl_cp_total",
            "datetime_iso",
            "file_source",
            "period",
            "service_class",
            "timestamp",
            "workload"
        ]
    );
}

#[test]
fn test_write_json_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rmf_report.json");
    write_json(&sample_records(), &path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["data"][1]["workload"], "A,B");
}

// =========================================================================
// JSONL
// =========================================================================

#[test]
fn test_jsonl_round_trip() {
    let records = sample_records();
    let jsonl = to_jsonl(&records).unwrap();
    let parsed: Vec<Record> = jsonl
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(parsed, records);
}

#[test]
fn test_write_jsonl_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rmf_report.jsonl");
    write_jsonl(&sample_records(), &path).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, to_jsonl(&sample_records()).unwrap());
}
