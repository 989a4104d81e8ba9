//! CSV export.
//!
//! Exports always cover the full record set in its original order, never
//! the filtered or paged view. Headers come from the columns; the actions
//! column is left out.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::{Terminator, WriterBuilder};
use serde_json::Value;
use tracing::{debug, error};

use crate::column::{Column, cell_text};
use crate::error::ExportError;

/// File name used when the browser has no title.
const DEFAULT_FILE_STEM: &str = "data";

/// `{title}.csv`, or `data.csv` without a title.
pub fn export_file_name(title: Option<&str>) -> String {
    let stem = title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_FILE_STEM);
    format!("{}.csv", stem)
}

/// Headers of the exportable columns, in column order.
pub fn export_headers(columns: &[Column]) -> Vec<&str> {
    columns
        .iter()
        .filter(|c| !c.is_actions())
        .map(Column::header)
        .collect()
}

/// Write `records` as CSV: a header row, then one row per record.
///
/// Rows are joined with CRLF and the last row has no line ending. Each cell is the record's value under the column header. Missing and
/// null values are empty, strings are written as-is and anything else as
/// compact JSON.
pub fn write_csv<W: Write>(mut writer: W, columns: &[Column], records: &[Value]) -> Result<(), ExportError> {
    let headers = exportable_headers(columns)?;

    let mut csv = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());
    csv.write_record(&headers)?;
    for record in records {
        csv.write_record(headers.iter().map(|h| cell_text(record.get(*h))))?;
    }
    let bytes = csv.into_inner().map_err(|e| e.into_error())?;

    writer.write_all(bytes.strip_suffix(b"\r\n").unwrap_or(&bytes[..]))?;
    writer.flush()?;
    Ok(())
}

/// Export `records` to `{dir}/{title|data}.csv` and return the file path.
///
/// Nothing is written if no columns are configured.
pub fn export_csv(
    dir: &Path,
    title: Option<&str>,
    columns: &[Column],
    records: &[Value],
) -> Result<PathBuf, ExportError> {
    exportable_headers(columns)?;

    let path = dir.join(export_file_name(title));
    let file = File::create(&path)?;
    write_csv(file, columns, records)?;

    debug!(path = %path.display(), rows = records.len(), "Exported CSV");
    Ok(path)
}

fn exportable_headers(columns: &[Column]) -> Result<Vec<&str>, ExportError> {
    let headers = export_headers(columns);
    if headers.is_empty() {
        error!("No columns defined for CSV export");
        return Err(ExportError::NoColumns);
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn columns() -> Vec<Column> {
        vec![
            Column::field("name", "Name"),
            Column::field("age", "Age"),
            Column::computed("Actions", |_| "[edit]".to_string()),
        ]
    }

    fn to_string(columns: &[Column], records: &[Value]) -> String {
        let mut out = Vec::new();
        write_csv(&mut out, columns, records).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn writes_headers_and_rows() {
        let records = vec![
            json!({"name": "Ana", "age": 3}),
            json!({"name": "Reyes, Ben", "age": null}),
            json!({"name": "Cora \"Coco\""}),
        ];
        assert_eq!(
            to_string(&columns(), &records),
            "name,age\r\nAna,3\r\n\"Reyes, Ben\",\r\n\"Cora \"\"Coco\"\"\","
        );
    }

    #[test]
    fn nested_values_are_compact_json() {
        let records = vec![json!({"name": {"first": "Ana"}, "age": [1, 2]})];
        assert_eq!(
            to_string(&columns(), &records),
            "name,age\r\n\"{\"\"first\"\":\"\"Ana\"\"}\",\"[1,2]\""
        );
    }

    #[test]
    fn computed_columns_export_by_title() {
        let columns = vec![
            Column::field("name", "Name"),
            Column::computed("Summary", |_| "x".to_string()),
        ];
        let records = vec![json!({"name": "a", "Summary": "stored"}), json!({"name": "b"})];
        assert_eq!(to_string(&columns, &records), "name,Summary\r\na,stored\r\nb,");
    }

    #[test]
    fn header_only_export_has_no_line_ending() {
        assert_eq!(to_string(&columns(), &[]), "name,age");
    }

    #[test]
    fn file_name_defaults_to_data() {
        assert_eq!(export_file_name(Some("Baptisms")), "Baptisms.csv");
        assert_eq!(export_file_name(None), "data.csv");
        assert_eq!(export_file_name(Some("  ")), "data.csv");
    }

    #[test]
    fn no_columns_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let err = export_csv(dir.path(), Some("Empty"), &[], &[json!({"a": 1})]).unwrap_err();
        assert!(matches!(err, ExportError::NoColumns));
        assert!(!dir.path().join("Empty.csv").exists());
    }

    #[test]
    fn export_csv_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = export_csv(dir.path(), None, &columns(), &[json!({"name": "Ana"})]).unwrap();
        assert_eq!(path, dir.path().join("data.csv"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "name,age\r\nAna,");
    }
}
