use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::columns::{Field, normalize_header};
use crate::encoding::{TextEncoding, attempted_encodings, decode_text};
use crate::error::{IngestError, Result};

/// One decoded input file with canonical column fields.
#[derive(Debug, Clone)]
pub struct CsvTable {
    /// Path or upload name the table was read from.
    pub source: String,
    pub encoding: TextEncoding,
    /// Normalized header text, one per column.
    pub headers: Vec<String>,
    /// Canonical field per column, aligned with `headers`.
    pub fields: Vec<Field>,
    /// Data rows, each padded or truncated to `headers.len()`.
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Index of the first column mapped to `field`.
    pub fn column(&self, field: &Field) -> Option<usize> {
        self.fields.iter().position(|candidate| candidate == field)
    }

    pub fn has_field(&self, field: &Field) -> bool {
        self.column(field).is_some()
    }

    /// Trimmed cell value for `field` in `row`; `None` when the column is absent.
    pub fn value<'a>(&self, row: &'a [String], field: &Field) -> Option<&'a str> {
        let index = self.column(field)?;
        row.get(index).map(String::as_str)
    }

    /// Headers that did not match any known field.
    pub fn unrecognized_headers(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|field| !field.is_recognized())
            .map(Field::key)
            .collect()
    }
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Reads a CSV file from disk.
///
/// # Errors
///
/// [`IngestError::FileNotFound`] when the path does not exist, otherwise the
/// errors of [`read_csv_bytes`].
pub fn read_csv_file(path: &Path) -> Result<CsvTable> {
    let bytes = std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    read_csv_bytes(&path.display().to_string(), &bytes)
}

/// Decodes and parses an in-memory CSV document.
///
/// The first record is the header row. Rows whose cells are all blank are
/// dropped; short rows are padded with empty cells.
///
/// # Errors
///
/// [`IngestError::Undecodable`] when no encoding accepts the bytes and
/// [`IngestError::CsvParse`] for malformed CSV.
pub fn read_csv_bytes(source: &str, bytes: &[u8]) -> Result<CsvTable> {
    let (text, encoding) = decode_text(bytes).ok_or_else(|| IngestError::Undecodable {
        input: source.to_string(),
        tried: attempted_encodings(),
    })?;
    debug!(source, encoding = %encoding, "decoded input");

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let header_record = match records.next() {
        Some(record) => record.map_err(|error| csv_error(source, &error))?,
        None => {
            return Ok(CsvTable {
                source: source.to_string(),
                encoding,
                headers: Vec::new(),
                fields: Vec::new(),
                rows: Vec::new(),
            });
        }
    };
    let headers: Vec<String> = header_record.iter().map(normalize_header).collect();
    let fields: Vec<Field> = header_record.iter().map(Field::from_header).collect();

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|error| csv_error(source, &error))?;
        let mut row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    info!(
        source,
        encoding = %encoding,
        columns = headers.len(),
        rows = rows.len(),
        "read csv"
    );
    Ok(CsvTable {
        source: source.to_string(),
        encoding,
        headers,
        fields,
        rows,
    })
}

fn csv_error(source: &str, error: &csv::Error) -> IngestError {
    IngestError::CsvParse {
        input: source.to_string(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_headers_to_fields() {
        let table = read_csv_bytes("mem.csv", b"ER , Customer,Notes\nER1,Tesla,x\n").unwrap();
        assert_eq!(table.headers, vec!["er", "customer", "notes"]);
        assert_eq!(table.fields[0], Field::EnhancementId);
        assert_eq!(table.column(&Field::Customer), Some(1));
        assert_eq!(table.unrecognized_headers(), vec!["notes"]);
    }

    #[test]
    fn pads_short_rows_and_drops_blank_ones() {
        let table = read_csv_bytes("mem.csv", b"ER,customer,module\nER1\n,,\nER2,Acme,CAD\n").unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["ER1", "", ""]);
        assert_eq!(table.value(&table.rows[1], &Field::Module), Some("CAD"));
        assert_eq!(table.value(&table.rows[1], &Field::Status), None);
    }

    #[test]
    fn empty_input_yields_empty_table() {
        let table = read_csv_bytes("empty.csv", b"").unwrap();
        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());
    }

    #[test]
    fn quoted_cells_keep_commas_and_newlines() {
        let table = read_csv_bytes(
            "mem.csv",
            b"IR,description,similar_to\nIR1,\"line one\nline \"\"two\"\"\",\"ER_1, IR_2\"\n",
        )
        .unwrap();
        assert_eq!(table.rows[0][1], "line one\nline \"two\"");
        assert_eq!(table.rows[0][2], "ER_1, IR_2");
    }
}
