//! # rmfpack
//!
//! A Rust library for extracting CPU utilization from IBM RMF Workload
//! Activity reports and turning it into filterable, exportable data.
//!
//! ## Overview
//!
//! RMF Workload Activity reports are fixed-format text listings. For every
//! reporting interval they show, per workload and service class period, the
//! share of a processor consumed (`APPL % CP`). rmfpack:
//!
//! - scans report text into flat [`Record`]s ([`scanner`])
//! - merges many reports into one record set with run statistics
//!   ([`core::aggregate`])
//! - derives facet values and date bounds for filter controls
//!   ([`core::metadata`])
//! - filters by workload, service class, source file and interval range
//!   ([`core::filter`])
//! - groups records into chart series ([`core::series`])
//! - exports CSV, JSON or JSONL ([`core::output`], [`format`])
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rmfpack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let batch = Aggregator::new().scan_dir("reports".as_ref())?;
//!     println!("{} files, {} records", batch.stats.files_parsed, batch.records.len());
//!
//!     let criteria = FilterCriteria::new()
//!         .with_service_class("PROD")
//!         .with_start_date("2024-01-15")?;
//!     let view = apply_filters(&batch.records, &criteria);
//!
//!     write_csv(&view, "rmf_report.csv")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`scanner`] - Line-oriented report scanner ([`ReportScanner`](scanner::ReportScanner))
//! - [`core`] - Aggregation, metadata, filtering, series and writers
//! - [`session`] - Current record set with snapshot reads
//! - [`config`] - [`ScanConfig`](config::ScanConfig)
//! - [`format`] - [`OutputFormat`](format::OutputFormat) and dispatching writers
//! - [`cli`] - CLI arguments (feature `cli`)
//! - [`error`] - [`RmfError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
#[cfg(feature = "cli")]
pub mod logging;
pub mod record;
pub mod scanner;
pub mod session;

// Re-export the main types at the crate root for convenience
pub use error::{Result, RmfError};
pub use record::Record;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use rmfpack::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Record;

    pub use crate::error::{Result, RmfError};

    pub use crate::config::ScanConfig;
    pub use crate::scanner::{ReportScanner, scan_report};

    pub use crate::core::aggregate::{Aggregator, Batch, ParseStats};
    pub use crate::core::filter::{FilterCriteria, apply_filters};
    pub use crate::core::metadata::{Metadata, derive_metadata};
    pub use crate::core::series::{Series, build_series};

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};

    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
    pub use crate::session::{Dataset, SessionStore};
}
