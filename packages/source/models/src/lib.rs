#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Raw property ledger records as supplied by the upstream source of truth.
//!
//! The reconciliation engine only ever reads the `label` of a record and
//! whether each numeric field is populated. Everything else is carried
//! through to the consumer untouched.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// One row from the upstream record list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputRecord {
    /// Opaque stable identifier, unique per row.
    pub id: String,
    /// Free-text display name, usually "street + house number [+ locality]".
    pub label: String,
    /// Optional monetary and year-like scalars.
    #[serde(flatten)]
    pub fields: NumericFields,
}

impl InputRecord {
    /// Creates a record with no numeric fields populated.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            fields: NumericFields::default(),
        }
    }

    /// Returns the record with `fields` replaced.
    #[must_use]
    pub const fn with_fields(mut self, fields: NumericFields) -> Self {
        self.fields = fields;
        self
    }
}

/// The fixed set of optional scalars attached to every record.
///
/// Values are pass-through data; only presence is ever inspected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericFields {
    /// Current balance of the account tied to the property.
    #[serde(default)]
    pub current_balance: Option<f64>,
    /// Year the record was last updated upstream.
    #[serde(default)]
    pub last_update_year: Option<i32>,
    /// Most recent year with booked activity.
    #[serde(default)]
    pub most_recent_year: Option<i32>,
    /// Original purchase price.
    #[serde(default)]
    pub purchase_price: Option<f64>,
    /// Latest market value estimate.
    #[serde(default)]
    pub market_value: Option<f64>,
}

impl NumericFields {
    /// Whether the given field carries a value.
    #[must_use]
    pub const fn is_populated(&self, field: NumericField) -> bool {
        match field {
            NumericField::CurrentBalance => self.current_balance.is_some(),
            NumericField::LastUpdateYear => self.last_update_year.is_some(),
            NumericField::MostRecentYear => self.most_recent_year.is_some(),
            NumericField::PurchasePrice => self.purchase_price.is_some(),
            NumericField::MarketValue => self.market_value.is_some(),
        }
    }

    /// Number of populated fields.
    #[must_use]
    pub fn populated_count(&self) -> usize {
        NumericField::ALL
            .iter()
            .filter(|field| self.is_populated(**field))
            .count()
    }
}

/// Names the members of [`NumericFields`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NumericField {
    /// See [`NumericFields::current_balance`].
    CurrentBalance,
    /// See [`NumericFields::last_update_year`].
    LastUpdateYear,
    /// See [`NumericFields::most_recent_year`].
    MostRecentYear,
    /// See [`NumericFields::purchase_price`].
    PurchasePrice,
    /// See [`NumericFields::market_value`].
    MarketValue,
}

impl NumericField {
    /// Every field, in declaration order.
    pub const ALL: &[Self] = &[
        Self::CurrentBalance,
        Self::LastUpdateYear,
        Self::MostRecentYear,
        Self::PurchasePrice,
        Self::MarketValue,
    ];

    /// Whether the field holds a year rather than an amount.
    #[must_use]
    pub const fn is_year(self) -> bool {
        matches!(self, Self::LastUpdateYear | Self::MostRecentYear)
    }

    /// The camelCase key used when a record is serialized.
    #[must_use]
    pub const fn json_key(self) -> &'static str {
        match self {
            Self::CurrentBalance => "currentBalance",
            Self::LastUpdateYear => "lastUpdateYear",
            Self::MostRecentYear => "mostRecentYear",
            Self::PurchasePrice => "purchasePrice",
            Self::MarketValue => "marketValue",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn serializes_flat_camel_case() {
        let record = InputRecord::new("a", "Elm Street 12").with_fields(NumericFields {
            current_balance: Some(12.5),
            last_update_year: Some(2023),
            ..NumericFields::default()
        });
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "a");
        assert_eq!(json["label"], "Elm Street 12");
        assert_eq!(json["currentBalance"], 12.5);
        assert_eq!(json["lastUpdateYear"], 2023);
        assert!(json["marketValue"].is_null());
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let record: InputRecord =
            serde_json::from_str(r#"{"id":"x","label":"Oak St 5","purchasePrice":100.0}"#)
                .unwrap();
        assert_eq!(record.fields.purchase_price, Some(100.0));
        assert_eq!(record.fields.current_balance, None);
        assert_eq!(record.fields.populated_count(), 1);
    }

    #[test]
    fn reports_presence_per_field() {
        let fields = NumericFields {
            most_recent_year: Some(2020),
            market_value: Some(0.0),
            ..NumericFields::default()
        };
        assert!(fields.is_populated(NumericField::MostRecentYear));
        assert!(fields.is_populated(NumericField::MarketValue));
        assert!(!fields.is_populated(NumericField::CurrentBalance));
        assert_eq!(fields.populated_count(), 2);
    }

    #[test]
    fn field_names_round_trip_through_strum() {
        for field in NumericField::ALL {
            assert_eq!(NumericField::from_str(field.as_ref()).unwrap(), *field);
        }
        assert_eq!(NumericField::LastUpdateYear.to_string(), "last_update_year");
        assert!(NumericField::LastUpdateYear.is_year());
        assert!(!NumericField::MarketValue.is_year());
    }
}
