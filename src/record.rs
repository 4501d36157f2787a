//! The measured-interval record produced by the report scanner.
//!
//! A [`Record`] is one APPL% CP Total reading for one
//! workload / service class / period combination during one RMF interval.
//! Records are created by the [`scanner`](crate::scanner) and never mutated
//! afterwards; every later stage (aggregation, filtering, export) only copies
//! or borrows them.
//!
//! # Examples
//!
//! ```
//! use rmfpack::Record;
//!
//! let rec = Record::new("BATCH", "PROD", 1, 45.67, "RMFW0001.txt")
//!     .with_timestamp("01/15/2024 08.30.00", "2024-01-15T08:30:00.000Z");
//!
//! assert_eq!(rec.series_key(), "PROD");
//! assert!(rec.has_timestamp());
//! ```
//!
//! ## Serialization
//!
//! The JSON shape keeps the field names the dashboard consumes:
//!
//! ```
//! use rmfpack::Record;
//!
//! let rec = Record::new("BATCH", "PROD", 2, 12.5, "a.txt")
//!     .with_timestamp("01/15/2024 08.30.00", "2024-01-15T08:30:00.000Z");
//! let json = serde_json::to_string(&rec)?;
//!
//! assert!(json.contains("\"timestamp\":\"01/15/2024 08.30.00\""));
//! assert!(json.contains("\"datetime_iso\":\"2024-01-15T08:30:00.000Z\""));
//! # Ok::<(), serde_json::Error>(())
//! ```

use serde::{Deserialize, Serialize};

/// One interval measurement for one service-class period.
///
/// | Field | JSON name | Description |
/// |-------|-----------|-------------|
/// | `timestamp_display` | `timestamp` | `MM/DD/YYYY HH.MM.SS` as found in the report |
/// | `timestamp_iso` | `datetime_iso` | Normalized instant used for sorting and filtering |
/// | `service_class` | `service_class` | Service class name |
/// | `workload` | `workload` | Workload name |
/// | `period` | `period` | Service-class period (≥ 1) |
/// | `appl_cp_total` | `appl_cp_total` | APPL% CP Total (may exceed 100) |
/// | `file_source` | `file_source` | File the record came from |
///
/// Both timestamp fields are `None` only for blocks that completed before
/// the first interval header of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Interval start exactly as printed in the report.
    #[serde(rename = "timestamp")]
    pub timestamp_display: Option<String>,

    /// Interval start as `YYYY-MM-DDTHH:MM:SS.sssZ` (naive wall clock).
    ///
    /// Holds the display string instead when the report's date could not be
    /// interpreted as a calendar date.
    #[serde(rename = "datetime_iso")]
    pub timestamp_iso: Option<String>,

    /// Service class name.
    pub service_class: String,

    /// Workload name.
    pub workload: String,

    /// Service-class period.
    pub period: u32,

    /// CPU time as a percentage of one engine.
    pub appl_cp_total: f64,

    /// Name of the report file this record was extracted from.
    pub file_source: String,
}

impl Record {
    /// Creates a record without a timestamp.
    pub fn new(
        workload: impl Into<String>,
        service_class: impl Into<String>,
        period: u32,
        appl_cp_total: f64,
        file_source: impl Into<String>,
    ) -> Self {
        Self {
            timestamp_display: None,
            timestamp_iso: None,
            service_class: service_class.into(),
            workload: workload.into(),
            period,
            appl_cp_total,
            file_source: file_source.into(),
        }
    }

    /// Builder-style method to set both timestamp forms.
    #[must_use]
    pub fn with_timestamp(mut self, display: impl Into<String>, iso: impl Into<String>) -> Self {
        self.timestamp_display = Some(display.into());
        self.timestamp_iso = Some(iso.into());
        self
    }

    /// Returns the display timestamp, or `""` when absent.
    pub fn display_time(&self) -> &str {
        self.timestamp_display.as_deref().unwrap_or("")
    }

    /// Returns the ISO timestamp if present.
    pub fn iso_time(&self) -> Option<&str> {
        self.timestamp_iso.as_deref()
    }

    /// Returns `true` if the record carries an interval timestamp.
    pub fn has_timestamp(&self) -> bool {
        self.timestamp_iso.is_some()
    }

    /// Chart series label: the service class, suffixed with `P<n>` for
    /// periods after the first.
    pub fn series_key(&self) -> String {
        if self.period > 1 {
            format!("{} P{}", self.service_class, self.period)
        } else {
            self.service_class.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_no_timestamp() {
        let rec = Record::new("STC", "SYSSTC", 1, 3.2, "r.txt");
        assert!(!rec.has_timestamp());
        assert_eq!(rec.display_time(), "");
        assert_eq!(rec.iso_time(), None);
    }

    #[test]
    fn test_with_timestamp() {
        let rec = Record::new("STC", "SYSSTC", 1, 3.2, "r.txt")
            .with_timestamp("05/15/2025 00.00.00", "2025-05-15T00:00:00.000Z");
        assert_eq!(rec.display_time(), "05/15/2025 00.00.00");
        assert_eq!(rec.iso_time(), Some("2025-05-15T00:00:00.000Z"));
    }

    #[test]
    fn test_series_key() {
        assert_eq!(Record::new("W", "PROD", 1, 0.0, "f").series_key(), "PROD");
        assert_eq!(Record::new("W", "PROD", 3, 0.0, "f").series_key(), "PROD P3");
    }

    #[test]
    fn test_serde_roundtrip() {
        let rec = Record::new("BATCH", "PROD", 2, 101.25, "a.txt")
            .with_timestamp("01/15/2024 08.30.00", "2024-01-15T08:30:00.000Z");
        let json = serde_json::to_string(&rec).unwrap();
        let parsed: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(rec, parsed);
    }

    #[test]
    fn test_missing_timestamp_serializes_as_null() {
        let rec = Record::new("BATCH", "PROD", 1, 1.0, "a.txt");
        let value = serde_json::to_value(&rec).unwrap();
        assert!(value["timestamp"].is_null());
        assert!(value["datetime_iso"].is_null());
    }
}
