//! TOML description of a ledger export.
//!
//! [`SourceConfig`] says how to read a file and which columns hold which
//! record fields. Every column defaults to the camelCase key the
//! reconciled output uses, so the CLI can read its own output without a
//! config file.

use std::path::Path;

use property_ledger_source_models::NumericField;
use serde::Deserialize;
use strum_macros::{AsRefStr, Display, EnumString};

use crate::SourceError;

/// How a ledger export is encoded on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Display, EnumString, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InputFormat {
    /// Comma (or `delimiter`) separated values with a header row.
    Csv,
    /// A JSON array of objects, or an object with a `records` array.
    Json,
}

impl InputFormat {
    /// Infers the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" | "tsv" | "txt" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// A complete, config-driven description of one ledger export.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// File format. Inferred from the extension when absent.
    pub format: Option<InputFormat>,
    /// CSV field delimiter (default: comma).
    pub delimiter: Option<String>,
    /// Parse amount strings German-style: `.` groups thousands, `,` is
    /// the decimal separator.
    pub decimal_comma: bool,
    /// Column names for each record field.
    pub fields: FieldMapping,
}

impl SourceConfig {
    /// Delimiter byte for the CSV reader.
    #[must_use]
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter
            .as_deref()
            .and_then(|d| d.as_bytes().first().copied())
            .unwrap_or(b',')
    }
}

/// Column names for every record field.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FieldMapping {
    /// Column names for the record id, tried in order.
    pub id: Vec<String>,
    /// Column names for the label, tried in order.
    pub label: Vec<String>,
    /// Column for [`NumericField::CurrentBalance`].
    pub current_balance: String,
    /// Column for [`NumericField::LastUpdateYear`].
    pub last_update_year: String,
    /// Column for [`NumericField::MostRecentYear`].
    pub most_recent_year: String,
    /// Column for [`NumericField::PurchasePrice`].
    pub purchase_price: String,
    /// Column for [`NumericField::MarketValue`].
    pub market_value: String,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            id: vec!["id".to_string()],
            label: vec!["label".to_string()],
            current_balance: NumericField::CurrentBalance.json_key().to_string(),
            last_update_year: NumericField::LastUpdateYear.json_key().to_string(),
            most_recent_year: NumericField::MostRecentYear.json_key().to_string(),
            purchase_price: NumericField::PurchasePrice.json_key().to_string(),
            market_value: NumericField::MarketValue.json_key().to_string(),
        }
    }
}

impl FieldMapping {
    /// Column holding the given numeric field.
    #[must_use]
    pub fn column(&self, field: NumericField) -> &str {
        match field {
            NumericField::CurrentBalance => &self.current_balance,
            NumericField::LastUpdateYear => &self.last_update_year,
            NumericField::MostRecentYear => &self.most_recent_year,
            NumericField::PurchasePrice => &self.purchase_price,
            NumericField::MarketValue => &self.market_value,
        }
    }
}

/// Parses a [`SourceConfig`] from a TOML string.
///
/// # Errors
///
/// Returns [`SourceError::Toml`] if the TOML is malformed or a field has
/// the wrong type.
pub fn parse_source_toml(toml_str: &str) -> Result<SourceConfig, SourceError> {
    Ok(toml::from_str(toml_str)?)
}

/// Reads and parses a [`SourceConfig`] file.
///
/// # Errors
///
/// Returns [`SourceError`] if the file cannot be read or parsed.
pub fn load_source_config(path: &Path) -> Result<SourceConfig, SourceError> {
    let contents = std::fs::read_to_string(path)?;
    let config = parse_source_toml(&contents)?;
    log::debug!("Loaded source config from {}", path.display());
    Ok(config)
}
