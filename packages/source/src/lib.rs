#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Loading of property ledger exports.
//!
//! An export is either a JSON document or a delimited text file with a
//! header row. Each row is first turned into a JSON object and then
//! mapped onto an [`InputRecord`] using the columns named in a
//! [`SourceConfig`].

pub mod config;
pub mod extract;
pub mod parsing;

use std::io::Read;
use std::path::Path;

use property_ledger_source_models::InputRecord;

use crate::config::{InputFormat, SourceConfig};
use crate::extract::extract_record;

/// Errors that can occur while loading a ledger export.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// I/O error (file read/write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV parsing failed.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// Source config TOML was malformed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The input format could not be determined.
    #[error("Unsupported input format: {path}")]
    UnsupportedFormat {
        /// Path of the offending file.
        path: String,
    },

    /// A row lacks a required column.
    #[error("Row {row} is missing required field {field}")]
    MissingField {
        /// Zero-based row index.
        row: usize,
        /// The column (or `|`-joined fallback columns) that was expected.
        field: String,
    },
}

/// Loads every record from the file at `path`.
///
/// The format comes from `config.format`, falling back to the file
/// extension.
///
/// # Errors
///
/// Returns [`SourceError`] if the file cannot be read, its format is
/// unknown, or a row lacks an id or label.
pub fn load_records(path: &Path, config: &SourceConfig) -> Result<Vec<InputRecord>, SourceError> {
    let format = config
        .format
        .or_else(|| InputFormat::from_path(path))
        .ok_or_else(|| SourceError::UnsupportedFormat {
            path: path.display().to_string(),
        })?;

    log::debug!("Reading {} as {format}", path.display());

    let records = match format {
        InputFormat::Json => {
            let contents = std::fs::read_to_string(path)?;
            records_from_json_str(&contents, config)?
        }
        InputFormat::Csv => {
            let file = std::fs::File::open(path)?;
            records_from_csv_reader(file, config)?
        }
    };

    log::info!("Loaded {} records from {}", records.len(), path.display());

    Ok(records)
}

/// Parses records from a JSON document.
///
/// Accepts either a top-level array of row objects or an object with a
/// `records` array.
///
/// # Errors
///
/// Returns [`SourceError::Json`] if the document is malformed or has
/// neither shape, and [`SourceError::MissingField`] for rows lacking an
/// id or label.
pub fn records_from_json_str(
    contents: &str,
    config: &SourceConfig,
) -> Result<Vec<InputRecord>, SourceError> {
    let document: serde_json::Value = serde_json::from_str(contents)?;
    let rows = match document {
        serde_json::Value::Array(rows) => rows,
        serde_json::Value::Object(mut map) => match map.remove("records") {
            Some(serde_json::Value::Array(rows)) => rows,
            _ => {
                return Err(SourceError::Json(serde::de::Error::custom(
                    "expected an array of records or an object with a \"records\" array",
                )));
            }
        },
        _ => {
            return Err(SourceError::Json(serde::de::Error::custom(
                "expected an array of records",
            )));
        }
    };

    rows.iter()
        .enumerate()
        .map(|(i, row)| extract_record(row, i, &config.fields, config.decimal_comma))
        .collect()
}

/// Parses records from delimited text with a header row.
///
/// Short rows are padded with empty cells. Every cell is trimmed.
///
/// # Errors
///
/// Returns [`SourceError::Csv`] if the input is malformed and
/// [`SourceError::MissingField`] for rows lacking an id or label.
pub fn records_from_csv_reader<R: Read>(
    reader: R,
    config: &SourceConfig,
) -> Result<Vec<InputRecord>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter_byte())
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{FEFF}').to_owned())
        .collect();

    let mut records = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let row = result?;

        let mut map = serde_json::Map::new();
        for (col, header) in headers.iter().enumerate() {
            let value = row.get(col).unwrap_or("").trim().to_owned();
            map.insert(header.clone(), serde_json::Value::String(value));
        }

        records.push(extract_record(
            &serde_json::Value::Object(map),
            i,
            &config.fields,
            config.decimal_comma,
        )?);
    }

    Ok(records)
}
