//! Per-label diagnostics for the `inspect` command.

use std::fmt;

use property_ledger_reconcile::placeholder::{
    is_placeholder, is_shadow_marked, strip_shadow_marker,
};
use property_ledger_reconcile::score::{Score, label_score, looks_incomplete};
use property_ledger_reconcile::{HeuristicSegmenter, LabelSegmenter};

/// Everything the engine derives from a single label.
#[derive(Debug)]
pub struct Inspection {
    pub label: String,
    pub display: String,
    pub canonical_key: String,
    pub base_key: String,
    pub locality: String,
    pub placeholder: bool,
    pub shadow: bool,
    pub incomplete: bool,
    pub score: Score,
}

impl Inspection {
    /// Derives keys the same way the engine does: placeholder and score
    /// from the raw label, keys from the shadow-stripped one.
    #[must_use]
    pub fn of(label: &str) -> Self {
        let segmenter = HeuristicSegmenter;
        let display = strip_shadow_marker(label);
        Self {
            label: label.to_string(),
            canonical_key: segmenter.canonical_key(&display),
            base_key: segmenter.base_key(&display),
            locality: segmenter.locality(&display),
            placeholder: is_placeholder(label),
            shadow: is_shadow_marked(label),
            incomplete: looks_incomplete(&display),
            score: label_score(label),
            display,
        }
    }
}

impl fmt::Display for Inspection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<14} {:?}", "label", self.label)?;
        writeln!(f, "{:<14} {:?}", "display", self.display)?;
        writeln!(f, "{:<14} {:?}", "canonical key", self.canonical_key)?;
        writeln!(f, "{:<14} {:?}", "base key", self.base_key)?;
        writeln!(f, "{:<14} {:?}", "locality", self.locality)?;
        writeln!(f, "{:<14} {}", "placeholder", self.placeholder)?;
        writeln!(f, "{:<14} {}", "shadow", self.shadow)?;
        writeln!(f, "{:<14} {}", "incomplete", self.incomplete)?;
        writeln!(f, "{:<14} {}", "label score", self.score)
    }
}
