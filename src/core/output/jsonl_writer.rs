//! JSON Lines (JSONL) output writer.
//!
//! One record object per line, convenient for `jq`, log shippers and
//! line-oriented loaders.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::Record;
use crate::error::Result;

fn write_lines<W: Write>(writer: &mut W, records: &[Record]) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut *writer, record)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Writes records to a JSONL file.
///
/// ```jsonl
/// {"timestamp":"01/15/2024 08.30.00","datetime_iso":"2024-01-15T08:30:00.000Z",...}
/// {"timestamp":"01/15/2024 08.45.00","datetime_iso":"2024-01-15T08:45:00.000Z",...}
/// ```
pub fn write_jsonl(records: &[Record], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}

/// Converts records to a JSONL string.
pub fn to_jsonl(records: &[Record]) -> Result<String> {
    let mut buf = Vec::new();
    write_lines(&mut buf, records)?;
    Ok(String::from_utf8(buf)?)
}
