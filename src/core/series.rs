//! Chart series derived from a record view.
//!
//! One series per service class (or class and period, for periods above 1),
//! each a time-ordered list of `(timestamp_iso, appl_cp_total)` points.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Record;

/// A single chart point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Interval start in ISO form.
    pub x: String,
    /// APPL % CP total.
    pub y: f64,
}

/// A named, x-ordered run of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub points: Vec<SeriesPoint>,
}

/// Groups records into chart series.
///
/// Records without a timestamp are skipped. Points are stably sorted by `x`
/// and series come back sorted by label.
///
/// # Example
///
/// ```
/// use rmfpack::core::series::build_series;
/// use rmfpack::Record;
///
/// let records = vec![
///     Record::new("BATCH", "PROD", 2, 12.5, "a.txt")
///         .with_timestamp("01/15/2024 08.45.00", "2024-01-15T08:45:00.000Z"),
///     Record::new("BATCH", "PROD", 1, 45.0, "a.txt")
///         .with_timestamp("01/15/2024 08.30.00", "2024-01-15T08:30:00.000Z"),
/// ];
///
/// let series = build_series(&records);
/// assert_eq!(series.len(), 2);
/// assert_eq!(series[0].label, "PROD");
/// assert_eq!(series[1].label, "PROD P2");
/// ```
pub fn build_series(records: &[Record]) -> Vec<Series> {
    let mut groups: BTreeMap<String, Vec<SeriesPoint>> = BTreeMap::new();

    for record in records {
        let Some(ts) = record.iso_time() else {
            continue;
        };
        groups
            .entry(record.series_key())
            .or_default()
            .push(SeriesPoint {
                x: ts.to_string(),
                y: record.appl_cp_total,
            });
    }

    groups
        .into_iter()
        .map(|(label, mut points)| {
            points.sort_by(|a, b| a.x.cmp(&b.x));
            Series { label, points }
        })
        .collect()
}
