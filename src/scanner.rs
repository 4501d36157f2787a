//! RMF Workload Activity report scanner.
//!
//! Reports are scanned in a single forward pass. Four kinds of lines matter,
//! checked in this order (first match wins):
//!
//! 1. Interval header: `START 05/15/2025-00.00.00 INTERVAL 000.15.00`
//! 2. Service-class header: `REPORT BY: POLICY=... WORKLOAD=BATCH SERVICE CLASS=PROD ... PERIOD=1`
//! 3. Zero-data marker: `-- ALL DATA ZERO --` (only inside an open block)
//! 4. Total line: `AVG  ... TOTAL  45.67` (only inside an open, non-empty block)
//!
//! Every other line is ignored. Each service-class block yields at most one
//! [`Record`]; a block that never sees its total line yields nothing.
//!
//! # Example
//!
//! ```
//! use rmfpack::scanner::scan_report;
//!
//! let report = "\
//! START 01/15/2024-08.30.00 INTERVAL 000.15.00
//! WORKLOAD=BATCH SERVICE CLASS=PROD RESOURCE GROUP=*NONE PERIOD=1
//! AVG 12.00 ACTUAL 10 TOTAL 45.67
//! ";
//!
//! let records = scan_report(report, "RMFW0001.txt");
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].appl_cp_total, 45.67);
//! assert_eq!(records[0].timestamp_display.as_deref(), Some("01/15/2024 08.30.00"));
//! ```

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::Record;
use crate::config::ScanConfig;
use crate::error::{Result, RmfError};

/// Output format of [`Record::timestamp_iso`].
pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

// Substring pre-checks, cheaper than running the regexes on every line.
const START_MARKER: &str = "START ";
const WORKLOAD_MARKER: &str = "WORKLOAD=";
const AVG_MARKER: &str = "AVG";
const ALL_DATA_ZERO_MARKER: &str = "ALL DATA ZERO";

static RE_INTERVAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"START\s+(\d{2}/\d{2}/\d{4})-(\d{2}\.\d{2}\.\d{2})\s+INTERVAL")
        .expect("interval header pattern is valid")
});

static RE_SERVICE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"WORKLOAD=(\w+)\s+SERVICE CLASS=(\w+)\s+.*?PERIOD=(\d+)")
        .expect("service class header pattern is valid")
});

static RE_TOTAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*AVG\s+.*?TOTAL\s+([\d.]+)").expect("total line pattern is valid")
});

/// Converts a report date (`MM/DD/YYYY`) and time (`HH.MM.SS`) into the ISO
/// form used for comparisons.
///
/// Falls back to the display form `"MM/DD/YYYY HH.MM.SS"` when the values do
/// not name a real calendar instant.
///
/// ```
/// use rmfpack::scanner::normalize_timestamp;
///
/// assert_eq!(normalize_timestamp("01/15/2024", "08.30.00"), "2024-01-15T08:30:00.000Z");
/// assert_eq!(normalize_timestamp("13/45/2024", "08.30.00"), "13/45/2024 08.30.00");
/// ```
pub fn normalize_timestamp(date: &str, time: &str) -> String {
    NaiveDateTime::parse_from_str(&format!("{date}-{time}"), "%m/%d/%Y-%H.%M.%S")
        .map(|dt| dt.format(ISO_FORMAT).to_string())
        .unwrap_or_else(|_| format!("{date} {time}"))
}

/// Line-to-line state of a scan.
///
/// The interval timestamp persists across blocks; the block fields are
/// overwritten by every service-class header.
#[derive(Debug, Default)]
struct ScanState {
    timestamp_display: Option<String>,
    timestamp_iso: Option<String>,
    workload: String,
    service_class: String,
    period: u32,
    /// A service-class header was seen and its block is still open.
    awaiting_total: bool,
    /// The open block was resolved as having no data.
    skip_class: bool,
}

impl ScanState {
    /// Feeds one line into the state machine. Returns a record when the line
    /// closes a block with a usable total.
    fn advance(&mut self, line: &str, source: &str) -> Option<Record> {
        if line.contains(START_MARKER) {
            if let Some(caps) = RE_INTERVAL.captures(line) {
                let date = &caps[1];
                let time = &caps[2];
                self.timestamp_display = Some(format!("{date} {time}"));
                self.timestamp_iso = Some(normalize_timestamp(date, time));
                return None;
            }
        }

        if line.contains(WORKLOAD_MARKER) {
            if let Some(caps) = RE_SERVICE_CLASS.captures(line) {
                self.workload = caps[1].to_string();
                self.service_class = caps[2].to_string();
                match caps[3].parse::<u32>() {
                    Ok(period) if period >= 1 => {
                        self.period = period;
                        self.awaiting_total = true;
                        self.skip_class = false;
                    }
                    _ => {
                        tracing::trace!(source, line, "Skipping block with unusable period");
                        self.awaiting_total = false;
                        self.skip_class = true;
                    }
                }
                return None;
            }
        }

        if !self.awaiting_total {
            return None;
        }

        if line.contains(ALL_DATA_ZERO_MARKER) {
            self.skip_class = true;
            self.awaiting_total = false;
            return None;
        }

        if self.skip_class || !line.contains(AVG_MARKER) {
            return None;
        }

        let caps = RE_TOTAL.captures(line)?;
        // Resolved either way: a block contributes at most one record.
        self.awaiting_total = false;

        let appl_cp_total = caps[1].parse::<f64>().ok()?;
        Some(Record {
            timestamp_display: self.timestamp_display.clone(),
            timestamp_iso: self.timestamp_iso.clone(),
            service_class: self.service_class.clone(),
            workload: self.workload.clone(),
            period: self.period,
            appl_cp_total,
            file_source: source.to_string(),
        })
    }
}

/// Scans raw report text and returns every record it contains, in report
/// order.
///
/// Never fails: unrecognised, incomplete or malformed content is skipped.
pub fn scan_report(text: &str, source: &str) -> Vec<Record> {
    let mut state = ScanState::default();
    let records: Vec<Record> = text
        .lines()
        .filter_map(|line| state.advance(line, source))
        .collect();

    tracing::trace!(source, records = records.len(), "Scanned report text");
    records
}

/// Returns the label recorded as [`Record::file_source`] for a path: its
/// final component.
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// File-level front end to [`scan_report`].
///
/// Owns the decoding policy (lossy or strict UTF-8). Reading and decoding
/// are the only fallible steps.
///
/// # Example
///
/// ```rust,no_run
/// use rmfpack::scanner::ReportScanner;
///
/// let scanner = ReportScanner::new();
/// let records = scanner.scan_file("RMFW0001.txt".as_ref())?;
/// # Ok::<(), rmfpack::RmfError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReportScanner {
    strict_utf8: bool,
}

impl ReportScanner {
    /// Creates a scanner that decodes reports lossily.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scanner following the decoding policy of `config`.
    pub fn with_config(config: &ScanConfig) -> Self {
        Self {
            strict_utf8: config.strict_utf8,
        }
    }

    /// Scans text that is already in memory.
    pub fn scan_str(&self, text: &str, source: &str) -> Vec<Record> {
        scan_report(text, source)
    }

    /// Reads and decodes a report file.
    pub fn load(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).map_err(|e| RmfError::read(path, e))?;
        if self.strict_utf8 {
            String::from_utf8(bytes).map_err(|e| RmfError::decode(path, e))
        } else {
            Ok(match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!(path = %path.display(), "Replacing invalid UTF-8 in report");
                    String::from_utf8_lossy(e.as_bytes()).into_owned()
                }
            })
        }
    }

    /// Reads, decodes and scans a report file.
    pub fn scan_file(&self, path: &Path) -> Result<Vec<Record>> {
        let text = self.load(path)?;
        Ok(scan_report(&text, &source_name(path)))
    }
}
