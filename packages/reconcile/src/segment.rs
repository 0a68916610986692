//! Pluggable label segmentation.
//!
//! The dedup engine only needs three derived strings per label. Keeping
//! them behind [`LabelSegmenter`] lets a proper address parser replace the
//! regex heuristics without touching scoring or bucketing.

use crate::identifier::reduce_to_base;
use crate::locality::extract_locality;
use crate::normalize::normalize;

/// Derives the matching keys of a label.
pub trait LabelSegmenter {
    /// Strict-pass key. Defaults to [`normalize`].
    fn canonical_key(&self, label: &str) -> String {
        normalize(label)
    }

    /// Trailing locality, lower-cased, or empty when unknown.
    fn locality(&self, label: &str) -> String;

    /// Loose-pass key: the canonical key without locality and house
    /// number.
    fn base_key(&self, label: &str) -> String {
        reduce_to_base(&self.canonical_key(label), &self.locality(label))
    }
}

/// The default regex-based segmentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicSegmenter;

impl LabelSegmenter for HeuristicSegmenter {
    fn locality(&self, label: &str) -> String {
        extract_locality(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_matches_free_functions() {
        let segmenter = HeuristicSegmenter;
        let label = "Hauptstraße 5, 10115 Berlin";
        assert_eq!(segmenter.canonical_key(label), "haupt str 5");
        assert_eq!(segmenter.locality(label), "berlin");
        assert_eq!(segmenter.base_key(label), crate::identifier::base_key(label));
    }

    struct NoLocality;

    impl LabelSegmenter for NoLocality {
        fn locality(&self, _label: &str) -> String {
            String::new()
        }
    }

    #[test]
    fn custom_locality_flows_into_base_key() {
        assert_eq!(NoLocality.base_key("Elm Street 12 Metroville"), "elm street 12 metroville");
        assert_eq!(HeuristicSegmenter.base_key("Elm Street 12 Metroville"), "elm street");
    }
}
