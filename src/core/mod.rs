//! Core processing logic for rmfpack.
//!
//! This module contains:
//! - [`aggregate`] - Batch scanning of many reports into one record set
//! - [`metadata`] - Facet values and date range of a record set
//! - [`filter`] - Record filtering by facet and interval range
//! - [`series`] - Chart series grouping
//! - [`output`] - Format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() {
//! use rmfpack::core::{
//!     Aggregator, FilterCriteria, Metadata,
//!     apply_filters, build_series, derive_metadata,
//!     to_csv, to_json, to_jsonl,
//! };
//! # }
//! ```

pub mod aggregate;
pub mod filter;
pub mod metadata;
pub mod output;
pub mod series;

pub use aggregate::{Aggregator, Batch, ParseStats, ReportInput, discover_reports};
pub use filter::{FilterCriteria, apply_filters, apply_filters_owned, filter_records};
pub use metadata::{DateRange, Metadata, derive_metadata};
pub use series::{Series, SeriesPoint, build_series};

pub use crate::Record;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_json_view, to_jsonl, write_json, write_jsonl};
