//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::Record;
use crate::error::Result;

/// Data endpoint envelope: a record view plus its size and the size of the
/// set it was drawn from.
#[derive(Serialize)]
struct DataEnvelope<'a> {
    data: &'a [Record],
    count: usize,
    total: usize,
}

/// Writes records to a JSON file.
///
/// # Format
/// ```json
/// {
///   "data": [{"timestamp": "01/15/2024 08.30.00", "datetime_iso": "...", ...}],
///   "count": 1,
///   "total": 1
/// }
/// ```
pub fn write_json(records: &[Record], output_path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(records)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts records to the JSON envelope with `count == total`.
pub fn to_json(records: &[Record]) -> Result<String> {
    to_json_view(records, records.len())
}

/// Converts a filtered view to the JSON envelope, reporting `total` as the
/// size of the unfiltered set.
pub fn to_json_view(view: &[Record], total: usize) -> Result<String> {
    let envelope = DataEnvelope {
        data: view,
        count: view.len(),
        total,
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}
