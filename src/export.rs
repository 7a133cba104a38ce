//! CSV export of projection records
//!
//! Text cells are always wrapped in double quotes with embedded quotes
//! doubled. Numeric cells are rounded to whole units and written bare.
//! Every row, the last included, ends with `\n`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;

use crate::error::ExportError;
use crate::projection::ProjectionRecord;

/// Column names written in the header row
pub const RECORD_HEADER: [&str; 4] = ["year", "expense", "growth", "endPrincipal"];

/// A single CSV field
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    /// Field as it appears in the output
    pub fn encode(&self) -> String {
        match self {
            Cell::Text(text) => format!("\"{}\"", text.replace('"', "\"\"")),
            Cell::Number(value) => {
                let rounded = value.round();
                // Avoid writing "-0" for small negatives
                if rounded == 0.0 {
                    "0".to_string()
                } else {
                    format!("{}", rounded)
                }
            }
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Text(text.to_string())
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::Text(text)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Number(value as f64)
    }
}

impl From<u32> for Cell {
    fn from(value: u32) -> Self {
        Cell::Number(value as f64)
    }
}

/// Encode one row without its line terminator
pub fn encode_row(cells: &[Cell]) -> String {
    cells.iter().map(Cell::encode).collect::<Vec<_>>().join(",")
}

/// Encode rows into a complete CSV document
pub fn to_csv_string(rows: &[Vec<Cell>]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&encode_row(row));
        out.push('\n');
    }
    out
}

/// Write rows to any writer
pub fn write_csv<W: Write>(mut writer: W, rows: &[Vec<Cell>]) -> Result<(), ExportError> {
    for row in rows {
        writeln!(writer, "{}", encode_row(row))?;
    }
    writer.flush()?;
    Ok(())
}

/// Header row followed by one row per record
pub fn record_rows(records: &[ProjectionRecord]) -> Vec<Vec<Cell>> {
    let header: Vec<Cell> = RECORD_HEADER.iter().map(|&name| Cell::from(name)).collect();

    std::iter::once(header)
        .chain(records.iter().map(|r| {
            vec![
                Cell::from(r.year),
                Cell::from(r.expense),
                Cell::from(r.growth),
                Cell::from(r.end_principal),
            ]
        }))
        .collect()
}

/// Records as a CSV document
pub fn records_to_csv(records: &[ProjectionRecord]) -> String {
    to_csv_string(&record_rows(records))
}

/// Write records to a CSV file, replacing it if present
pub fn write_records_csv<P: AsRef<Path>>(
    path: P,
    records: &[ProjectionRecord],
) -> Result<(), ExportError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| ExportError::File {
        path: path.to_path_buf(),
        source,
    })?;

    write_csv(BufWriter::new(file), &record_rows(records))?;
    info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_rows_line_count() {
        let rows = vec![
            vec![Cell::from("a"), Cell::from("b")],
            vec![Cell::from(1), Cell::from(2)],
            vec![Cell::from(3), Cell::from(4)],
        ];

        let csv = to_csv_string(&rows);
        assert_eq!(csv.lines().count(), 3);
        assert_eq!(csv, "\"a\",\"b\"\n1,2\n3,4\n");
    }

    #[test]
    fn test_text_escaping() {
        assert_eq!(Cell::from("x,y").encode(), "\"x,y\"");
        assert_eq!(Cell::from("q\"q").encode(), "\"q\"\"q\"");
        assert_eq!(Cell::from("").encode(), "\"\"");
        assert_eq!(Cell::from("42").encode(), "\"42\"");
    }

    #[test]
    fn test_numbers_rounded_and_unquoted() {
        assert_eq!(Cell::from(1234.4).encode(), "1234");
        assert_eq!(Cell::from(1234.5).encode(), "1235");
        assert_eq!(Cell::from(-1234.6).encode(), "-1235");
        assert_eq!(Cell::from(-0.3).encode(), "0");
        assert_eq!(Cell::from(2_500_000.0).encode(), "2500000");
    }

    #[test]
    fn test_records_to_csv() {
        let records = vec![
            ProjectionRecord::new(1, 100_000.0, 70_123.6, 902_345.49),
            ProjectionRecord::new(2, 103_000.0, 63_164.2, 862_509.7),
        ];

        let csv = records_to_csv(&records);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "\"year\",\"expense\",\"growth\",\"endPrincipal\"");
        assert_eq!(lines[1], "1,100000,70124,902345");
        assert_eq!(lines[2], "2,103000,63164,862510");
    }

    #[test]
    fn test_empty_records_still_have_header() {
        assert_eq!(records_to_csv(&[]).lines().count(), 1);
    }

    #[test]
    fn test_write_csv_matches_string() {
        let rows = vec![vec![Cell::from("name"), Cell::from("value")], vec![Cell::from("a\"b"), Cell::from(7.7)]];

        let mut buf = Vec::new();
        write_csv(&mut buf, &rows).unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), to_csv_string(&rows));
    }
}
