//! Multi-file record aggregation.
//!
//! The [`Aggregator`] runs the scanner once per report and merges the
//! results into a single [`Batch`]: records in file order (then report
//! order) plus [`ParseStats`]. Files that cannot be read or decoded are
//! counted and described in the stats; they never abort the batch.
//!
//! # Example
//!
//! ```
//! use rmfpack::core::aggregate::Aggregator;
//!
//! let report = "\
//! START 01/15/2024-08.30.00 INTERVAL
//! WORKLOAD=BATCH SERVICE CLASS=PROD PERIOD=1
//! AVG 1.00 TOTAL 45.67
//! ";
//!
//! let batch = Aggregator::new().scan_texts([("a.txt", report), ("b.txt", report)]);
//! assert_eq!(batch.records.len(), 2);
//! assert_eq!(batch.records[1].file_source, "b.txt");
//! assert_eq!(batch.stats.files_success, 2);
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::Record;
use crate::config::ScanConfig;
use crate::error::{Result, RmfError};
use crate::scanner::{ReportScanner, scan_report, source_name};

/// Statistics about one aggregation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Number of files attempted.
    pub files_parsed: usize,
    /// Files that were read and scanned.
    pub files_success: usize,
    /// Files that failed to read or decode.
    pub files_failed: usize,
    /// Names of all attempted files, in attempt order.
    pub file_names: Vec<String>,
    /// Records extracted across all files.
    pub total_records: usize,
    /// Wall time of the run, rounded to milliseconds.
    pub parse_time_seconds: f64,
    /// `"filename: message"` for each failed file.
    pub errors: Vec<String>,
}

impl ParseStats {
    /// Returns `true` if any file failed.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Folds another run's statistics into this one.
    pub fn absorb(&mut self, other: ParseStats) {
        self.files_parsed += other.files_parsed;
        self.files_success += other.files_success;
        self.files_failed += other.files_failed;
        self.file_names.extend(other.file_names);
        self.total_records += other.total_records;
        self.parse_time_seconds = round_millis(self.parse_time_seconds + other.parse_time_seconds);
        self.errors.extend(other.errors);
    }
}

/// Merged output of one aggregation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    /// All records, file order then report order.
    pub records: Vec<Record>,
    /// Run statistics.
    pub stats: ParseStats,
}

impl Batch {
    /// Appends another batch after this one.
    pub fn extend(&mut self, other: Batch) {
        self.records.extend(other.records);
        self.stats.absorb(other.stats);
    }
}

/// One file handed to the aggregator: its name and either its text or the
/// error hit while loading it.
#[derive(Debug)]
pub struct ReportInput {
    /// File name recorded as the records' source.
    pub name: String,
    /// Loaded text, or the read/decode failure.
    pub text: Result<String>,
}

impl ReportInput {
    /// An input whose text is available.
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: Ok(text.into()),
        }
    }

    /// An input that could not be loaded.
    pub fn failed(name: impl Into<String>, error: RmfError) -> Self {
        Self {
            name: name.into(),
            text: Err(error),
        }
    }
}

/// Per-file result before merging.
struct FileOutcome {
    name: String,
    records: Result<Vec<Record>>,
}

/// Runs the scanner over batches of reports.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: ScanConfig,
    scanner: ReportScanner,
}

impl Aggregator {
    /// Creates an aggregator with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an aggregator with custom configuration.
    pub fn with_config(config: ScanConfig) -> Self {
        let scanner = ReportScanner::with_config(&config);
        Self { config, scanner }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scans `(file name, text)` pairs that are already in memory.
    pub fn scan_texts<I, N, T>(&self, files: I) -> Batch
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: Into<String>,
    {
        let inputs = files
            .into_iter()
            .map(|(name, text)| ReportInput::text(name, text))
            .collect();
        self.scan_inputs(inputs)
    }

    /// Scans loaded inputs, counting the ones that failed to load.
    pub fn scan_inputs(&self, inputs: Vec<ReportInput>) -> Batch {
        let start = Instant::now();
        let outcomes = self.run_tasks(inputs, |input| FileOutcome {
            records: input.text.map(|text| scan_report(&text, &input.name)),
            name: input.name,
        });
        merge(outcomes, start.elapsed())
    }

    /// Reads and scans each file. Each file is read inside its own task.
    pub fn scan_paths(&self, paths: &[PathBuf]) -> Batch {
        let start = Instant::now();
        let outcomes = self.run_tasks(paths.iter().collect(), |path: &PathBuf| {
            tracing::debug!(path = %path.display(), "Parsing report");
            FileOutcome {
                name: source_name(path),
                records: self.scanner.scan_file(path),
            }
        });
        merge(outcomes, start.elapsed())
    }

    /// Scans every file in `dir` matching the configured pattern.
    ///
    /// Fails only when the pattern itself is invalid.
    pub fn scan_dir(&self, dir: &Path) -> Result<Batch> {
        let paths = discover_reports(dir, &self.config.pattern)?;
        tracing::info!(dir = %dir.display(), files = paths.len(), "Discovered reports");
        Ok(self.scan_paths(&paths))
    }

    /// Maps every item to an outcome, as parallel tasks when enabled.
    /// Results keep the order of `items`.
    fn run_tasks<T, F>(&self, items: Vec<T>, task: F) -> Vec<FileOutcome>
    where
        T: Send,
        F: Fn(T) -> FileOutcome + Send + Sync,
    {
        #[cfg(feature = "parallel")]
        {
            if self.config.parallel && items.len() > 1 {
                use rayon::prelude::*;
                return items.into_par_iter().map(task).collect();
            }
        }

        items.into_iter().map(task).collect()
    }
}

/// Lists the files in `dir` whose names match `pattern`, sorted by path.
///
/// Entries that cannot be inspected are skipped with a warning.
pub fn discover_reports(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    glob::Pattern::new(pattern)?;

    let escaped_dir = glob::Pattern::escape(&dir.to_string_lossy());
    let full_pattern = Path::new(&escaped_dir).join(pattern);

    let mut paths: Vec<PathBuf> = glob::glob(&full_pattern.to_string_lossy())?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!(path = %e.path().display(), error = %e.error(), "Skipping unreadable entry");
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();

    paths.sort();
    Ok(paths)
}

fn merge(outcomes: Vec<FileOutcome>, elapsed: Duration) -> Batch {
    let mut batch = Batch::default();
    batch.stats.files_parsed = outcomes.len();

    for outcome in outcomes {
        match outcome.records {
            Ok(mut records) => {
                tracing::info!(file = %outcome.name, records = records.len(), "Parsed report");
                batch.stats.files_success += 1;
                batch.records.append(&mut records);
            }
            Err(err) => {
                tracing::warn!(file = %outcome.name, error = %err, "Failed to load report");
                batch.stats.files_failed += 1;
                batch
                    .stats
                    .errors
                    .push(format!("{}: {}", outcome.name, failure_message(&err)));
            }
        }
        batch.stats.file_names.push(outcome.name);
    }

    batch.stats.total_records = batch.records.len();
    batch.stats.parse_time_seconds = round_millis(elapsed.as_secs_f64());

    tracing::info!(
        files = batch.stats.files_parsed,
        failed = batch.stats.files_failed,
        records = batch.stats.total_records,
        seconds = batch.stats.parse_time_seconds,
        "Aggregation complete"
    );
    batch
}

/// Message stored in [`ParseStats::errors`]; the file name is prepended by
/// the caller, so path-carrying variants contribute only their cause.
fn failure_message(err: &RmfError) -> String {
    match err {
        RmfError::Read { source, .. } => source.to_string(),
        RmfError::Decode { source, .. } => format!("invalid UTF-8: {source}"),
        other => other.to_string(),
    }
}

fn round_millis(seconds: f64) -> f64 {
    (seconds * 1000.0).round() / 1000.0
}
