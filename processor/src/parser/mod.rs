//! CSV loading with encoding auto-detection, and input discovery.
//!
//! Produces a [`Table`]; nothing SFS-specific happens here.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CsvError, CsvResult, SchemaError};
use crate::models::{Cell, Table};

/// Suffix of files picked up by [`list_csv_files`]
pub const CSV_EXTENSION: &str = "csv";

/// A loaded table with read metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub table: Table,
    /// Detected encoding
    pub encoding: String,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "utf-8-sig" | "" => "utf-8".to_string(),
        "iso-8859-1" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding.
///
/// Non-UTF-8 labels resolve through the WHATWG label table, so
/// `iso-8859-1` decodes as windows-1252 (a superset keeping `¤`, `½`).
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let label = encoding.to_lowercase();
    let decoded = match label.as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8(bytes.to_vec())
            .map_err(|e| CsvError::EncodingError(e.to_string()))?,
        other => {
            let other = if other == "latin-1" { "latin1" } else { other };
            let codec = encoding_rs::Encoding::for_label(other.as_bytes())
                .ok_or_else(|| CsvError::EncodingError(format!("Unsupported encoding: {}", encoding)))?;
            let (text, _, had_errors) = codec.decode(bytes);
            if had_errors {
                return Err(CsvError::EncodingError(format!("Invalid {} content", codec.name())));
            }
            text.into_owned()
        }
    };

    Ok(decoded.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(decoded))
}

/// Parse comma-separated text with a header row into a [`Table`].
///
/// Empty fields become `None`; everything else is kept verbatim so
/// numbers are written back exactly as read. Short rows are padded
/// with `None`, a row longer than the header is an error.
pub fn parse_table(content: &str) -> CsvResult<Table> {
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() > columns.len() {
            return Err(CsvError::RaggedRow {
                line: record.position().map(|p| p.line()).unwrap_or_default(),
                expected: columns.len(),
                found: record.len(),
            });
        }
        let row: Vec<Cell> = record
            .iter()
            .map(|v| if v.is_empty() { None } else { Some(v.to_string()) })
            .collect();
        rows.push(row);
    }

    Table::new(columns, rows).map_err(|e| match e {
        SchemaError::DuplicateColumn(name) | SchemaError::MissingColumn(name) => CsvError::DuplicateHeader(name),
    })
}

/// Parse raw bytes, detecting the encoding first.
pub fn parse_bytes_auto(bytes: &[u8]) -> CsvResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let table = parse_table(&content)?;
    Ok(ParseResult { table, encoding })
}

/// Read and parse a CSV file. No partial table is returned on failure.
pub fn read_table(path: impl AsRef<Path>) -> CsvResult<ParseResult> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| CsvError::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    parse_bytes_auto(&bytes)
}

/// Names of regular `.csv` files directly inside `dir`, sorted.
pub fn list_csv_files(dir: impl AsRef<Path>) -> CsvResult<Vec<String>> {
    let dir = dir.as_ref();
    let io_err = |source| CsvError::IoError { path: dir.to_path_buf(), source };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path: PathBuf = entry.map_err(io_err)?.path();
        if !path.is_file() || !path.extension().is_some_and(|e| e == CSV_EXTENSION) {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.push(name.to_string());
        }
    }

    names.sort();
    Ok(names)
}
