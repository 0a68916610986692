//! Completeness scoring.
//!
//! Ranks competing records for the same entity. A visible house number
//! outweighs everything else, truncation costs half of that, populated
//! numeric fields break the remaining ties, and a shadow marker sinks the
//! record below any unmarked competitor.

use property_ledger_source_models::{InputRecord, NumericField};
use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

use crate::identifier::has_street_number;
use crate::normalize::ELLIPSIS_CHARS;
use crate::placeholder::{is_shadow_marked, strip_shadow_marker};

/// Ordered completeness score. Higher wins.
pub type Score = i32;

/// Awarded when the label carries a plausible house number.
pub const STREET_NUMBER_BONUS: Score = 100;

/// Applied when the label still looks truncated.
pub const TRUNCATION_PENALTY: Score = -50;

/// Applied when the original label carries a shadow marker.
pub const SHADOW_PENALTY: Score = -1000;

/// Ellipsis-like run left behind by upstream truncation, over the same
/// characters the normalizer erases.
static TRUNCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{ELLIPSIS_CHARS}{{3,}}|[\x{{2026}}\x{{22EF}}]")).expect("valid regex")
});

/// Weight of a populated numeric field.
#[must_use]
pub const fn field_weight(field: NumericField) -> Score {
    match field {
        NumericField::CurrentBalance => 10,
        NumericField::LastUpdateYear => 5,
        NumericField::MostRecentYear => 2,
        NumericField::PurchasePrice | NumericField::MarketValue => 1,
    }
}

/// Scores a whole record.
#[must_use]
pub fn score(record: &InputRecord) -> Score {
    let fields: Score = NumericField::ALL
        .iter()
        .filter(|field| record.fields.is_populated(**field))
        .map(|field| field_weight(*field))
        .sum();
    label_score(&record.label) + fields
}

/// Scores the label part alone: street number, truncation and shadow
/// marker. Number and truncation are judged on the shadow-stripped label.
#[must_use]
pub fn label_score(label: &str) -> Score {
    let display = strip_shadow_marker(label);
    let mut total = 0;
    if has_street_number(&display) {
        total += STREET_NUMBER_BONUS;
    }
    if looks_truncated(&display) {
        total += TRUNCATION_PENALTY;
    }
    if is_shadow_marked(label) {
        total += SHADOW_PENALTY;
    }
    total
}

/// Whether the label still shows an ellipsis, in any width.
#[must_use]
pub fn looks_truncated(label: &str) -> bool {
    let compat: String = label.nfkc().collect();
    TRUNCATION_RE.is_match(&compat)
}

/// Whether a display label lacks a house number or looks truncated.
#[must_use]
pub fn looks_incomplete(label: &str) -> bool {
    !has_street_number(label) || looks_truncated(label)
}

#[cfg(test)]
mod tests {
    use property_ledger_source_models::NumericFields;

    use super::*;

    #[test]
    fn rewards_street_number() {
        assert_eq!(label_score("Elm Street 12"), 100);
        assert_eq!(label_score("Elm Street"), 0);
    }

    #[test]
    fn penalizes_truncation() {
        assert_eq!(label_score("Elm Street ..."), -50);
        assert_eq!(label_score("Elm Street 12…"), 50);
    }

    #[test]
    fn treats_every_erased_ellipsis_as_truncation() {
        assert!(looks_truncated("Elm Street 12\u{00B7}\u{00B7}\u{00B7}"));
        assert!(looks_truncated("Elm Street 12\u{FF0E}\u{FF0E}\u{FF0E}"));
        assert!(looks_truncated("Elm Street \u{22EF}"));
        assert!(!looks_truncated("Elm\u{00B7}Street 12"));
        assert!(!looks_truncated("St. Anna Platz 1"));
        assert_eq!(label_score("Elm Street 12\u{00B7}\u{00B7}\u{00B7}"), 50);
    }

    #[test]
    fn penalizes_shadow_marker_but_scores_stripped_label() {
        assert_eq!(label_score("Elm Street 12 (shadow copy)"), -900);
        assert_eq!(label_score("Schattenkopie Elm Street"), -1000);
    }

    #[test]
    fn weighs_numeric_fields() {
        let record = InputRecord::new("a", "Elm Street").with_fields(NumericFields {
            current_balance: Some(1.0),
            last_update_year: Some(2024),
            most_recent_year: Some(2023),
            purchase_price: Some(2.0),
            market_value: Some(3.0),
        });
        assert_eq!(score(&record), 10 + 5 + 2 + 1 + 1);
    }

    #[test]
    fn counts_zero_as_populated() {
        let record = InputRecord::new("a", "Elm Street 12").with_fields(NumericFields {
            current_balance: Some(0.0),
            ..NumericFields::default()
        });
        assert_eq!(score(&record), 110);
    }

    #[test]
    fn shadow_row_never_beats_unmarked_row() {
        let shadow = InputRecord::new("s", "Elm Street 12 (shadow copy)").with_fields(NumericFields {
            current_balance: Some(1.0),
            last_update_year: Some(2024),
            most_recent_year: Some(2023),
            purchase_price: Some(2.0),
            market_value: Some(3.0),
        });
        let plain = InputRecord::new("p", "Elm Street ...");
        assert!(score(&shadow) < score(&plain));
    }

    #[test]
    fn detects_incomplete_labels() {
        assert!(looks_incomplete("Elm Street"));
        assert!(looks_incomplete("Elm Street 12..."));
        assert!(looks_incomplete(""));
        assert!(!looks_incomplete("Elm Street 12 Metroville"));
    }

    #[test]
    fn detects_truncation() {
        assert!(looks_truncated("Elm Str..."));
        assert!(looks_truncated("Elm Str\u{2026}"));
        assert!(!looks_truncated("St. Peter 1"));
        assert!(!looks_truncated("Elm St.."));
    }
}
