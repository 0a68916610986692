#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared types describing the outcome of a reconciliation run.
//!
//! This crate contains only data types. It has no regex tables and no
//! engine logic.

use property_ledger_source_models::InputRecord;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

/// Why a record was left out of the reconciled list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DropReason {
    /// The label matches a test-fixture naming convention.
    Placeholder,
    /// Another record with the same canonical key scored higher.
    StrictDuplicate {
        /// Id of the record that was kept instead.
        winner_id: String,
    },
    /// The record looked incomplete and a compatible bucket holds a
    /// strictly better record.
    LooseDuplicate {
        /// Id of the record that outranked this one.
        winner_id: String,
    },
}

impl DropReason {
    /// Id of the record that replaced the dropped one, if any.
    #[must_use]
    pub fn winner_id(&self) -> Option<&str> {
        match self {
            Self::Placeholder => None,
            Self::StrictDuplicate { winner_id } | Self::LooseDuplicate { winner_id } => {
                Some(winner_id)
            }
        }
    }
}

/// One discarded input row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DroppedRecord {
    /// Id of the discarded record.
    pub id: String,
    /// Its label exactly as supplied.
    pub label: String,
    /// Why it was discarded.
    pub reason: DropReason,
}

/// Full outcome of one reconciliation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReport {
    /// Winning records with their display label, in output order.
    pub records: Vec<InputRecord>,
    /// Every discarded record, in input order.
    pub dropped: Vec<DroppedRecord>,
}

impl ReconcileReport {
    /// Number of records dropped for the given reason kind.
    #[must_use]
    pub fn dropped_count(&self, kind: &str) -> usize {
        self.dropped
            .iter()
            .filter(|d| d.reason.as_ref() == kind)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_reason_with_kind_tag() {
        let reason = DropReason::LooseDuplicate {
            winner_id: "a".to_string(),
        };
        let json = serde_json::to_value(&reason).unwrap();
        assert_eq!(json["kind"], "loose_duplicate");
        assert_eq!(json["winner_id"], "a");
        assert_eq!(reason.to_string(), "loose_duplicate");
    }

    #[test]
    fn exposes_winner_id() {
        assert_eq!(DropReason::Placeholder.winner_id(), None);
        assert_eq!(
            DropReason::StrictDuplicate {
                winner_id: "w".to_string()
            }
            .winner_id(),
            Some("w")
        );
    }

    #[test]
    fn counts_drops_by_kind() {
        let report = ReconcileReport {
            records: Vec::new(),
            dropped: vec![
                DroppedRecord {
                    id: "1".to_string(),
                    label: "rls test".to_string(),
                    reason: DropReason::Placeholder,
                },
                DroppedRecord {
                    id: "2".to_string(),
                    label: "Elm Street ...".to_string(),
                    reason: DropReason::LooseDuplicate {
                        winner_id: "3".to_string(),
                    },
                },
            ],
        };
        assert_eq!(report.dropped_count("placeholder"), 1);
        assert_eq!(report.dropped_count("loose_duplicate"), 1);
        assert_eq!(report.dropped_count("strict_duplicate"), 0);
    }
}
