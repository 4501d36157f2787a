//! Export format selection.
//!
//! [`OutputFormat`] is independent of any CLI framework so library callers
//! can choose a writer at runtime.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> rmfpack::Result<()> {
//! use rmfpack::format::{OutputFormat, to_format_string};
//! use rmfpack::Record;
//!
//! let records = vec![Record::new("BATCH", "PROD", 1, 45.67, "RMFW0001.txt")];
//!
//! let format = OutputFormat::from_path("report.jsonl")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//!
//! let text = to_format_string(&records, format)?;
//! assert_eq!(text.lines().count(), 1);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Record;
use crate::error::{Result, RmfError};

/// Export format for record sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Six-column CSV with the fixed export header (default)
    #[default]
    Csv,

    /// `{data, count, total}` envelope
    Json,

    /// One record object per line (NDJSON)
    Jsonl,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    ///
    /// ```rust
    /// use rmfpack::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::Jsonl.extension(), "jsonl");
    /// ```
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Returns all accepted format names.
    pub fn all_names() -> &'static [&'static str] {
        &["csv", "json", "jsonl", "ndjson"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Csv, OutputFormat::Json, OutputFormat::Jsonl]
    }

    /// Returns the MIME type served for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "text/csv",
            OutputFormat::Json => "application/json",
            OutputFormat::Jsonl => "application/x-ndjson",
        }
    }

    /// Cargo feature that provides the writer for this format.
    fn feature(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv-output",
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
        }
    }

    /// Detects the format from a file extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`RmfError::InvalidFormat`] for unknown or missing extensions.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(RmfError::invalid_format(
                "output",
                format!("Unknown file extension: '.{ext}'. Expected one of: csv, json, jsonl"),
            )),
        }
    }

    fn unavailable(self) -> RmfError {
        RmfError::invalid_format(
            "output",
            format!(
                "Output format {self} requires the '{}' feature to be enabled",
                self.feature()
            ),
        )
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(format!(
                "Unknown format: '{s}'. Expected one of: {}",
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Writes records to `path` in the given format.
///
/// # Errors
///
/// Returns an error if the format's feature is disabled or the file cannot
/// be written.
#[allow(unused_variables)]
pub fn write_to_format(
    records: &[Record],
    path: impl AsRef<Path>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(records, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(records, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(records, path),
        #[allow(unreachable_patterns)]
        _ => Err(format.unavailable()),
    }
}

/// Renders records to a string in the given format.
#[allow(unused_variables)]
pub fn to_format_string(records: &[Record], format: OutputFormat) -> Result<String> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(records),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(records),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(records),
        #[allow(unreachable_patterns)]
        _ => Err(format.unavailable()),
    }
}
