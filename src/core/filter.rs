//! Filter records by facet values and interval range.
//!
//! This module provides [`FilterCriteria`] for defining filter criteria and
//! [`apply_filters`] for deriving filtered views.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Workload | [`with_workload`](FilterCriteria::with_workload) | Exact workload name |
//! | Service class | [`with_service_class`](FilterCriteria::with_service_class) | Exact service class name |
//! | Source file | [`with_file_source`](FilterCriteria::with_file_source) | Exact file name |
//! | Start | [`with_start`](FilterCriteria::with_start) | Intervals at or after an ISO instant |
//! | End | [`with_end`](FilterCriteria::with_end) | Intervals at or before an ISO instant |
//!
//! # Examples
//!
//! ```
//! use rmfpack::core::filter::{FilterCriteria, apply_filters};
//! use rmfpack::Record;
//!
//! let records = vec![
//!     Record::new("BATCH", "PROD", 1, 45.0, "a.txt")
//!         .with_timestamp("01/15/2024 08.30.00", "2024-01-15T08:30:00.000Z"),
//!     Record::new("BATCH", "TEST", 1, 5.0, "a.txt")
//!         .with_timestamp("01/15/2024 08.30.00", "2024-01-15T08:30:00.000Z"),
//! ];
//!
//! let criteria = FilterCriteria::new()
//!     .with_service_class("PROD")
//!     .with_start("2024-01-15T00:00:00.000Z");
//! let view = apply_filters(&records, &criteria);
//!
//! assert_eq!(view.len(), 1);
//! assert_eq!(view[0].service_class, "PROD");
//! ```
//!
//! # Behavior Notes
//!
//! - Facet matching is exact and case-sensitive
//! - Date bounds are inclusive and compare ISO strings lexicographically
//! - Records without a timestamp are **excluded** when a date bound is set
//! - Empty strings count as "not set"
//! - Multiple filters are combined with AND logic

use std::borrow::Cow;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::Record;
use crate::error::{Result, RmfError};
use crate::scanner::ISO_FORMAT;

/// Accepted layouts for datetime filter bounds (after stripping a trailing `Z`).
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Optional, conjunctive filter over records.
///
/// Serializes as the dashboard's filter request:
/// `{workload?, service_class?, file_source?, start_date?, end_date?}`.
///
/// # Examples
///
/// ```
/// use rmfpack::core::filter::FilterCriteria;
///
/// # fn main() -> rmfpack::Result<()> {
/// let by_class = FilterCriteria::new().with_service_class("PROD");
///
/// // User-facing dates are normalized to ISO bounds
/// let by_day = FilterCriteria::new()
///     .with_start_date("2024-01-15")?
///     .with_end_date("2024-01-15")?;
/// assert_eq!(by_day.start_date.as_deref(), Some("2024-01-15T00:00:00.000Z"));
/// assert_eq!(by_day.end_date.as_deref(), Some("2024-01-15T23:59:59.999Z"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Include only records of this workload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workload: Option<String>,

    /// Include only records of this service class.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_class: Option<String>,

    /// Include only records from this file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_source: Option<String>,

    /// Include only records at or after this ISO instant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    /// Include only records at or before this ISO instant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl FilterCriteria {
    /// Creates empty criteria; every record passes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the workload filter.
    #[must_use]
    pub fn with_workload(mut self, workload: impl Into<String>) -> Self {
        self.workload = Some(workload.into());
        self
    }

    /// Sets the service class filter.
    #[must_use]
    pub fn with_service_class(mut self, service_class: impl Into<String>) -> Self {
        self.service_class = Some(service_class.into());
        self
    }

    /// Sets the source file filter.
    #[must_use]
    pub fn with_file_source(mut self, file_source: impl Into<String>) -> Self {
        self.file_source = Some(file_source.into());
        self
    }

    /// Sets the inclusive lower bound verbatim.
    ///
    /// The value is compared as a string against `timestamp_iso`, so it
    /// should already be in `YYYY-MM-DDTHH:MM:SS.sssZ` form.
    #[must_use]
    pub fn with_start(mut self, iso: impl Into<String>) -> Self {
        self.start_date = Some(iso.into());
        self
    }

    /// Sets the inclusive upper bound verbatim.
    #[must_use]
    pub fn with_end(mut self, iso: impl Into<String>) -> Self {
        self.end_date = Some(iso.into());
        self
    }

    /// Sets the lower bound from user input.
    ///
    /// A plain `YYYY-MM-DD` means the start of that day; datetimes are
    /// normalized to the ISO record form.
    ///
    /// # Errors
    ///
    /// Returns [`RmfError::InvalidDate`] if the input is not a date or datetime.
    pub fn with_start_date(mut self, input: &str) -> Result<Self> {
        self.start_date = Some(parse_bound(input, NaiveTime::MIN)?);
        Ok(self)
    }

    /// Sets the upper bound from user input.
    ///
    /// A plain `YYYY-MM-DD` means the last millisecond of that day.
    ///
    /// # Errors
    ///
    /// Returns [`RmfError::InvalidDate`] if the input is not a date or datetime.
    pub fn with_end_date(mut self, input: &str) -> Result<Self> {
        let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
            .ok_or_else(|| RmfError::invalid_date(input))?;
        self.end_date = Some(parse_bound(input, end_of_day)?);
        Ok(self)
    }

    /// Returns `true` if any filter is set.
    pub fn is_active(&self) -> bool {
        [
            &self.workload,
            &self.service_class,
            &self.file_source,
            &self.start_date,
            &self.end_date,
        ]
        .into_iter()
        .any(|field| set(field).is_some())
    }

    /// Returns `true` if a date bound is set.
    pub fn has_date_filter(&self) -> bool {
        set(&self.start_date).is_some() || set(&self.end_date).is_some()
    }

    /// Returns `true` if `record` satisfies every set criterion.
    pub fn matches(&self, record: &Record) -> bool {
        if set(&self.workload).is_some_and(|w| record.workload != w) {
            return false;
        }
        if set(&self.service_class).is_some_and(|c| record.service_class != c) {
            return false;
        }
        if set(&self.file_source).is_some_and(|f| record.file_source != f) {
            return false;
        }

        if self.has_date_filter() {
            let Some(ts) = record.iso_time() else {
                // No timestamp - excluded from date-bounded views
                return false;
            };
            if set(&self.start_date).is_some_and(|start| ts < start) {
                return false;
            }
            if set(&self.end_date).is_some_and(|end| ts > end) {
                return false;
            }
        }

        true
    }
}

/// A field counts as set only when present and non-empty.
fn set(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// Parses a user-supplied bound into the ISO record form. Date-only input
/// takes `time_of_day`.
fn parse_bound(input: &str, time_of_day: NaiveTime) -> Result<String> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(time_of_day).format(ISO_FORMAT).to_string());
    }

    let without_zone = trimmed.strip_suffix('Z').unwrap_or(trimmed);
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(without_zone, fmt).ok())
        .map(|dt| dt.format(ISO_FORMAT).to_string())
        .ok_or_else(|| RmfError::invalid_date(input))
}

/// Returns the records matching `criteria`, in their original order.
///
/// When no criterion is set the input is returned as-is (borrowed, no copy).
pub fn apply_filters<'a>(records: &'a [Record], criteria: &FilterCriteria) -> Cow<'a, [Record]> {
    if !criteria.is_active() {
        return Cow::Borrowed(records);
    }

    Cow::Owned(
        records
            .iter()
            .filter(|record| criteria.matches(record))
            .cloned()
            .collect(),
    )
}

/// Like [`apply_filters`], with the criteria themselves optional.
pub fn filter_records<'a>(
    records: &'a [Record],
    criteria: Option<&FilterCriteria>,
) -> Cow<'a, [Record]> {
    match criteria {
        Some(criteria) => apply_filters(records, criteria),
        None => Cow::Borrowed(records),
    }
}

/// Consuming variant of [`apply_filters`].
pub fn apply_filters_owned(records: Vec<Record>, criteria: &FilterCriteria) -> Vec<Record> {
    if !criteria.is_active() {
        return records;
    }

    records
        .into_iter()
        .filter(|record| criteria.matches(record))
        .collect()
}
