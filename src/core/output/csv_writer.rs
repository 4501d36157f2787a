//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::Record;
use crate::error::Result;

/// Fixed export header.
pub const CSV_HEADER: [&str; 6] = [
    "DATE-TIME",
    "SERVICE CLASS",
    "WORKLOAD",
    "PERIOD",
    "APPL % CP",
    "SOURCE FILE",
];

/// Pre-stringified cells for one record, in header order.
///
/// The timestamp uses its display form; an untimed record gets an empty cell.
pub fn csv_row(record: &Record) -> [String; 6] {
    [
        record.display_time().to_string(),
        record.service_class.clone(),
        record.workload.clone(),
        record.period.to_string(),
        record.appl_cp_total.to_string(),
        record.file_source.clone(),
    ]
}

fn writer_for<W: Write>(sink: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(sink)
}

fn write_rows<W, I, R>(sink: W, rows: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    let mut writer = writer_for(sink);
    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Serializes arbitrary pre-stringified rows under [`CSV_HEADER`].
///
/// Fields are quoted only when they contain a delimiter, quote or line break.
pub fn rows_to_csv<I, R>(rows: I) -> Result<String>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    let mut buf = Vec::new();
    write_rows(&mut buf, rows)?;
    Ok(String::from_utf8(buf)?)
}

/// Renders records as CSV text, one row per record in input order.
///
/// # Example
///
/// ```
/// use rmfpack::core::output::to_csv;
/// use rmfpack::Record;
///
/// let rec = Record::new("A,B", "PROD", 1, 45.67, "RMFW0001.txt")
///     .with_timestamp("01/15/2024 08.30.00", "2024-01-15T08:30:00.000Z");
/// let csv = to_csv(&[rec])?;
///
/// assert_eq!(
///     csv,
///     "DATE-TIME,SERVICE CLASS,WORKLOAD,PERIOD,APPL % CP,SOURCE FILE\n\
///      01/15/2024 08.30.00,PROD,\"A,B\",1,45.67,RMFW0001.txt\n"
/// );
/// # Ok::<(), rmfpack::RmfError>(())
/// ```
pub fn to_csv(records: &[Record]) -> Result<String> {
    rows_to_csv(records.iter().map(csv_row))
}

/// Writes records as CSV to `output_path`.
pub fn write_csv(records: &[Record], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    write_rows(file, records.iter().map(csv_row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn sample() -> Record {
        Record::new("BATCH", "PROD", 1, 45.67, "RMFW0001.txt")
            .with_timestamp("01/15/2024 08.30.00", "2024-01-15T08:30:00.000Z")
    }

    #[test]
    fn test_header_only_for_empty() {
        let csv = to_csv(&[]).unwrap();
        assert_eq!(csv, "DATE-TIME,SERVICE CLASS,WORKLOAD,PERIOD,APPL % CP,SOURCE FILE\n");
    }

    #[test]
    fn test_row_cells() {
        let row = csv_row(&sample());
        assert_eq!(
            row,
            ["01/15/2024 08.30.00", "PROD", "BATCH", "1", "45.67", "RMFW0001.txt"]
        );
    }

    #[test]
    fn test_whole_number_percentage() {
        let rec = Record::new("W", "C", 1, 50.0, "f");
        assert_eq!(csv_row(&rec)[4], "50");
    }

    #[test]
    fn test_untimed_record_empty_cell() {
        let csv = to_csv(&[Record::new("W", "C", 2, 1.5, "f")]).unwrap();
        assert!(csv.ends_with("\n,C,W,2,1.5,f\n"));
    }

    #[test]
    fn test_quoting_only_when_needed() {
        let rows = vec![vec!["a\"b", "plain", "x\ny", "c,d", "", "e"]];
        let csv = rows_to_csv(rows).unwrap();
        let body = csv.split_once('\n').unwrap().1;
        assert_eq!(body, "\"a\"\"b\",plain,\"x\ny\",\"c,d\",,e\n");
    }

    #[test]
    fn test_write_csv_file() {
        let temp = NamedTempFile::new().unwrap();
        write_csv(&[sample()], temp.path()).unwrap();

        let content = std::fs::read_to_string(temp.path()).unwrap();
        assert_eq!(content, to_csv(&[sample()]).unwrap());
        assert!(!content.contains('\r'));
    }
}
