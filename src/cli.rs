//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options
//!
//! [`Args`] also knows how to turn its flags into the library's
//! [`ScanConfig`] and [`FilterCriteria`], so the binary stays a thin shell.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_PATTERN, ScanConfig};
use crate::core::aggregate::discover_reports;
use crate::core::filter::FilterCriteria;
use crate::error::Result;

/// Default output file name; its extension follows `--format`.
pub const DEFAULT_OUTPUT: &str = "rmf_report.csv";

/// Extract APPL % CP totals from RMF Workload Activity reports
/// and export them as CSV, JSON or JSONL.
#[derive(Parser, Debug, Clone)]
#[command(name = "rmfpack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    rmfpack RMFW0001.txt
    rmfpack reports/ -o cpu.csv
    rmfpack reports/ --service-class PROD --after 2024-01-15
    rmfpack reports/ -p '*.rpt' --format jsonl -o -
    rmfpack reports/ --metadata")]
pub struct Args {
    /// Report files or directories (directories are searched with --pattern)
    #[arg(required = true, value_name = "INPUTS")]
    pub inputs: Vec<PathBuf>,

    /// File name pattern used inside directories
    #[arg(short, long, value_name = "GLOB", default_value = DEFAULT_PATTERN)]
    pub pattern: String,

    /// Path to output file ("-" writes to stdout)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Keep only this workload
    #[arg(long, value_name = "NAME")]
    pub workload: Option<String>,

    /// Keep only this service class
    #[arg(long, value_name = "NAME")]
    pub service_class: Option<String>,

    /// Keep only records from this report file
    #[arg(long, value_name = "FILE")]
    pub source: Option<String>,

    /// Keep intervals at or after this date (YYYY-MM-DD or ISO datetime)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep intervals at or before this date (YYYY-MM-DD or ISO datetime)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Print metadata JSON to stdout instead of exporting
    #[arg(long, conflicts_with = "series")]
    pub metadata: bool,

    /// Print chart series JSON to stdout instead of exporting
    #[arg(long)]
    pub series: bool,

    /// Treat invalid UTF-8 as a read failure
    #[arg(long)]
    pub strict_utf8: bool,

    /// Scan files one after another
    #[arg(long)]
    pub sequential: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Scanner settings from the flags.
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig::new()
            .with_pattern(self.pattern.clone())
            .with_parallel(!self.sequential)
            .with_strict_utf8(self.strict_utf8)
    }

    /// Filter criteria from the flags.
    ///
    /// # Errors
    ///
    /// Returns [`RmfError::InvalidDate`](crate::RmfError::InvalidDate) for
    /// unparseable `--after` / `--before` values.
    pub fn filter_criteria(&self) -> Result<FilterCriteria> {
        let mut criteria = FilterCriteria::new();

        if let Some(ref workload) = self.workload {
            criteria = criteria.with_workload(workload.clone());
        }
        if let Some(ref class) = self.service_class {
            criteria = criteria.with_service_class(class.clone());
        }
        if let Some(ref source) = self.source {
            criteria = criteria.with_file_source(source.clone());
        }
        if let Some(ref after) = self.after {
            criteria = criteria.with_start_date(after)?;
        }
        if let Some(ref before) = self.before {
            criteria = criteria.with_end_date(before)?;
        }

        Ok(criteria)
    }

    /// Expands the inputs into report paths, in argument order.
    ///
    /// Directories contribute their matching files, sorted; anything else is
    /// passed through so that a missing file shows up as a read failure.
    ///
    /// # Errors
    ///
    /// Returns [`RmfError::Pattern`](crate::RmfError::Pattern) for an invalid
    /// `--pattern`.
    pub fn report_paths(&self) -> Result<Vec<PathBuf>> {
        glob::Pattern::new(&self.pattern)?;

        let mut paths = Vec::new();
        for input in &self.inputs {
            if input.is_dir() {
                paths.extend(discover_reports(input, &self.pattern)?);
            } else {
                paths.push(input.clone());
            }
        }
        Ok(paths)
    }

    /// Returns `true` if the run prints data on stdout.
    pub fn writes_stdout(&self) -> bool {
        self.metadata || self.series || self.output == "-"
    }

    /// The output path, with the default name's extension following
    /// `--format`.
    pub fn output_path(&self) -> String {
        if self.output != DEFAULT_OUTPUT {
            return self.output.clone();
        }
        let lib_format: crate::format::OutputFormat = self.format.into();
        format!("rmf_report.{}", lib_format.extension())
    }
}

/// Output format options.
///
/// ```rust
/// use rmfpack::cli::OutputFormat;
///
/// let format = OutputFormat::Jsonl;
/// assert_eq!(format.to_string(), "JSONL");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Six-column CSV (default)
    #[default]
    Csv,

    /// JSON envelope with count and total
    Json,

    /// JSON Lines - one record per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}
