//! Mapping of raw rows onto [`InputRecord`].

use property_ledger_source_models::{InputRecord, NumericField, NumericFields};

use crate::SourceError;
use crate::config::FieldMapping;
use crate::parsing::{parse_amount, parse_year, year_from_f64};

/// Builds one [`InputRecord`] from a JSON object row.
///
/// # Errors
///
/// Returns [`SourceError::MissingField`] if no id or label column is
/// present. An empty label is accepted.
pub fn extract_record(
    row: &serde_json::Value,
    row_index: usize,
    mapping: &FieldMapping,
    decimal_comma: bool,
) -> Result<InputRecord, SourceError> {
    let id = extract_id(row, &mapping.id).ok_or_else(|| SourceError::MissingField {
        row: row_index,
        field: mapping.id.join("|"),
    })?;
    let label = extract_label(row, &mapping.label).ok_or_else(|| SourceError::MissingField {
        row: row_index,
        field: mapping.label.join("|"),
    })?;

    let mut fields = NumericFields::default();
    for field in NumericField::ALL {
        let column = mapping.column(*field);
        let Some(value) = row.get(column).filter(|v| !v.is_null()) else {
            continue;
        };
        if field.is_year() {
            let year = extract_year(value);
            warn_unparsed(year.is_none(), value, column, row_index);
            match field {
                NumericField::LastUpdateYear => fields.last_update_year = year,
                _ => fields.most_recent_year = year,
            }
        } else {
            let amount = extract_amount(value, decimal_comma);
            warn_unparsed(amount.is_none(), value, column, row_index);
            match field {
                NumericField::CurrentBalance => fields.current_balance = amount,
                NumericField::PurchasePrice => fields.purchase_price = amount,
                _ => fields.market_value = amount,
            }
        }
    }

    Ok(InputRecord { id, label, fields })
}

/// Tries each column in order and returns the first non-empty id.
/// Numeric ids are converted to strings.
fn extract_id(row: &serde_json::Value, columns: &[String]) -> Option<String> {
    for column in columns {
        match row.get(column) {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => {
                return Some(s.trim().to_string());
            }
            Some(serde_json::Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

/// Tries each column in order and returns the first string present,
/// even if empty.
fn extract_label(row: &serde_json::Value, columns: &[String]) -> Option<String> {
    for column in columns {
        match row.get(column) {
            Some(serde_json::Value::String(s)) => return Some(s.clone()),
            Some(serde_json::Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

fn extract_amount(value: &serde_json::Value, decimal_comma: bool) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => parse_amount(s, decimal_comma),
        _ => None,
    }
}

fn extract_year(value: &serde_json::Value) -> Option<i32> {
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .and_then(|y| i32::try_from(y).ok())
            .or_else(|| n.as_f64().and_then(year_from_f64)),
        serde_json::Value::String(s) => parse_year(s),
        _ => None,
    }
}

/// Logs a value that was present but could not be parsed. Blank strings
/// are an ordinary "no value" and stay silent.
fn warn_unparsed(failed: bool, value: &serde_json::Value, column: &str, row_index: usize) {
    let blank = value.as_str().is_some_and(|s| s.trim().is_empty());
    if failed && !blank {
        log::warn!("Row {row_index}: could not parse {column} value {value}");
    }
}
