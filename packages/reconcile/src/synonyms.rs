//! Locale folding tables.
//!
//! Ledger labels mix umlauts with their ASCII transliterations and spell
//! the street suffix half a dozen ways. These tables fold every variant
//! onto one form so that "Hauptstraße 5" and "Hauptstr. 5" compare equal.
//! Both inputs are expected to be lower-cased already.

use regex::Regex;
use std::sync::LazyLock;

/// Letters folded to their ASCII digraph equivalents.
pub const LETTER_FOLDS: &[(char, &str)] = &[('ß', "ss"), ('ä', "ae"), ('ö', "oe"), ('ü', "ue")];

/// The short token every street-suffix spelling folds to.
pub const STREET_SUFFIX_CANONICAL: &str = "str";

/// Full spellings of the street suffix, after letter folding.
pub const STREET_SUFFIX_FULL_FORMS: &[&str] = &["strasse"];

/// Full suffix spelling, standalone or glued onto the preceding word.
static FULL_FORM_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = STREET_SUFFIX_FULL_FORMS
        .iter()
        .map(|form| regex::escape(form))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?:{alternation})\b")).expect("valid regex")
});

/// Abbreviation with a trailing period.
static ABBREVIATION_DOT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{}\.", regex::escape(STREET_SUFFIX_CANONICAL))).expect("valid regex")
});

/// Abbreviation glued onto a preceding word of at least two letters.
static GLUED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b(\p{{L}}{{2,}}){}\b",
        regex::escape(STREET_SUFFIX_CANONICAL)
    ))
    .expect("valid regex")
});

/// Replaces every letter listed in [`LETTER_FOLDS`].
#[must_use]
pub fn fold_letters(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match LETTER_FOLDS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => out.push_str(to),
            None => out.push(c),
        }
    }
    out
}

/// Folds every street-suffix spelling to [`STREET_SUFFIX_CANONICAL`],
/// splitting it off the preceding word when glued.
#[must_use]
pub fn fold_street_suffix(input: &str) -> String {
    let mut current = input.to_string();
    // A split can expose another full spelling (`strassestrasse`), so
    // fold until nothing changes. Every round shortens a word or splits
    // one, which bounds the loop.
    loop {
        let folded = fold_street_suffix_once(&current);
        if folded == current {
            return folded;
        }
        current = folded;
    }
}

fn fold_street_suffix_once(input: &str) -> String {
    let folded = FULL_FORM_RE.replace_all(input, STREET_SUFFIX_CANONICAL);
    let folded = ABBREVIATION_DOT_RE.replace_all(&folded, format!("{STREET_SUFFIX_CANONICAL} "));
    GLUED_RE
        .replace_all(&folded, format!("${{1}} {STREET_SUFFIX_CANONICAL}"))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_umlauts_and_sharp_s() {
        assert_eq!(fold_letters("münchen"), "muenchen");
        assert_eq!(fold_letters("schöne aussicht"), "schoene aussicht");
        assert_eq!(fold_letters("gärtnerstraße"), "gaertnerstrasse");
    }

    #[test]
    fn passes_through_unlisted_letters() {
        assert_eq!(fold_letters("café 12"), "café 12");
        assert_eq!(fold_letters(""), "");
    }

    #[test]
    fn folds_full_suffix() {
        assert_eq!(fold_street_suffix("haupt strasse 5"), "haupt str 5");
    }

    #[test]
    fn folds_abbreviation_with_period() {
        assert_eq!(fold_street_suffix("haupt str. 5"), "haupt str  5");
    }

    #[test]
    fn leaves_bare_abbreviation() {
        assert_eq!(fold_street_suffix("haupt str 5"), "haupt str 5");
    }

    #[test]
    fn splits_glued_suffix() {
        assert_eq!(fold_street_suffix("hauptstrasse 5"), "haupt str 5");
        assert_eq!(fold_street_suffix("hauptstr. 5"), "haupt str  5");
        assert_eq!(fold_street_suffix("hauptstr 5"), "haupt str 5");
    }

    #[test]
    fn folds_repeated_full_suffix() {
        assert_eq!(fold_street_suffix("strassestrasse"), "str str");
        assert_eq!(fold_street_suffix("hauptstrassestrasse 5"), "haupt str str 5");
        assert_eq!(fold_street_suffix("str str"), "str str");
    }

    #[test]
    fn ignores_words_that_merely_contain_the_suffix() {
        assert_eq!(fold_street_suffix("strassenbahn 3"), "strassenbahn 3");
        assert_eq!(fold_street_suffix("elm street 12"), "elm street 12");
    }
}
