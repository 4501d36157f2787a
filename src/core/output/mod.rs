//! Output format writers.
//!
//! - [`write_csv`] / [`to_csv`] - the fixed six-column export, requires `csv-output`
//! - [`write_json`] / [`to_json`] - `{data, count, total}` envelope, requires `json-output`
//! - [`write_jsonl`] / [`to_jsonl`] - one record per line, requires `json-output`
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> rmfpack::Result<()> {
//! use rmfpack::core::output::{to_csv, write_csv, write_json};
//! use rmfpack::Record;
//!
//! let records = vec![Record::new("BATCH", "PROD", 1, 45.67, "RMFW0001.txt")];
//!
//! write_csv(&records, "rmf_report.csv")?;
//! write_json(&records, "rmf_report.json")?;
//!
//! let csv_string = to_csv(&records)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
pub mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{CSV_HEADER, csv_row, rows_to_csv, to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, to_json_view, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
