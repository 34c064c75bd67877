//! Reading the raw extract: code-page decoding and CSV parsing.

use std::fs;
use std::path::Path;

use encoding_rs::Encoding;
use tracing::{debug, warn};

use crate::error::{MapError, Result};

/// Header and cells of the source file, untyped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    /// Every row has exactly `headers.len()` cells.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Like [`column_index`](Self::column_index) but fails with
    /// [`MapError::MissingColumn`].
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| MapError::MissingColumn(name.to_string()))
    }
}

/// Decodes raw file bytes using the encoding named by `label`
/// (any WHATWG label, e.g. `"windows-1252"`, `"cp1252"`, `"utf-8"`).
///
/// # Errors
///
/// Returns [`MapError::UnknownEncoding`] if the label is not recognised.
pub fn decode_source(bytes: &[u8], label: &str) -> Result<String> {
    let encoding = Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| MapError::UnknownEncoding(label.to_string()))?;
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!(
            encoding = used.name(),
            "source contained undecodable bytes; replaced with U+FFFD"
        );
    }
    Ok(text.into_owned())
}

/// Parses comma-separated text into a [`RawTable`].
///
/// Header names are trimmed. Short rows are padded with empty cells and
/// surplus cells are ignored, so ragged exports still load.
///
/// # Errors
///
/// Returns [`MapError::Csv`] on structurally broken input (e.g. an
/// unterminated quote).
pub fn read_table(text: &str) -> Result<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let width = headers.len();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let mut row: Vec<String> = record.iter().take(width).map(str::to_string).collect();
        row.resize(width, String::new());
        rows.push(row);
    }

    debug!(columns = width, rows = rows.len(), "parsed source table");
    Ok(RawTable { headers, rows })
}

/// Reads and parses the extract at `path`.
///
/// # Errors
///
/// Returns [`MapError::Read`] if the file cannot be read, plus any error from
/// [`decode_source`] or [`read_table`].
pub fn load_raw_table(path: &Path, encoding: &str) -> Result<RawTable> {
    let bytes = fs::read(path).map_err(|source| MapError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = decode_source(&bytes, encoding)?;
    read_table(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_windows_1252_punctuation() {
        // 0x92 is a right single quote, 0xA3 a pound sign.
        let bytes = b"Site Name\nO\x92Neil \xA3\n";
        let text = decode_source(bytes, "windows-1252").expect("known label");
        assert!(text.contains("O\u{2019}Neil \u{a3}"));
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = decode_source(b"", "klingon-8").unwrap_err();
        assert!(matches!(err, MapError::UnknownEncoding(_)));
    }

    #[test]
    fn ragged_rows_are_normalised() {
        let table = read_table(" A ,B,C\n1,2\n4,5,6,7\n").expect("parse");
        assert_eq!(table.headers, vec!["A", "B", "C"]);
        assert_eq!(table.rows[0], vec!["1", "2", ""]);
        assert_eq!(table.rows[1], vec!["4", "5", "6"]);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let table = read_table("A,B\n1,2\n").expect("parse");
        let err = table.require_column("X-coordinate").unwrap_err();
        assert!(err.to_string().contains("X-coordinate"));
    }
}
