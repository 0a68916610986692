//! Label normalization for record matching.
//!
//! Provides a deterministic, idempotent pipeline that turns a free-text
//! ledger label into its canonical comparison key. "Hauptstraße 5,
//! 10115 Berlin" and "HAUPTSTR. 5" both reduce to `haupt str 5`.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

use crate::synonyms;

/// Whitespace code points that survive NFKC, plus zero-width spaces.
static INVISIBLE_WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\s\x{00A0}\x{1680}\x{180E}\x{2000}-\x{200B}\x{2028}\x{2029}\x{202F}\x{205F}\x{2060}\x{3000}\x{FEFF}]+")
        .expect("valid regex")
});

/// Characters that form an ellipsis when three or more are in a row.
pub(crate) const ELLIPSIS_CHARS: &str = r"[.\x{00B7}\x{2026}\x{22EF}]";

/// Runs of three or more ellipsis-like characters.
static ELLIPSIS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("{ELLIPSIS_CHARS}{{3,}}")).expect("valid regex"));

/// Hyphen, minus and the Unicode dash family.
static DASH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\-\x{2010}-\x{2015}\x{2212}\x{FE58}\x{FE63}\x{FF0D}]").expect("valid regex")
});

/// Structural punctuation and quote characters.
static PUNCTUATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"[.,;:!?/\\()\[\]{}<>"'`#*+|\x{00AB}\x{00B4}\x{00BB}\x{2018}-\x{201F}\x{2039}\x{203A}]"#,
    )
    .expect("valid regex")
});

/// Trailing locality clause: a 4-5 digit postal code, optionally behind a
/// one-letter country marker, followed by one or more words.
///
/// Runs after dashes became spaces, so `D-10115` arrives as `d 10115`.
static TRAILING_LOCALITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\b[a-z]\s+)?\b\d{4,5}(?:\s+[\p{L}\p{N}]+)+\s*$").expect("valid regex")
});

/// Normalizes a label into its canonical comparison key.
///
/// The pipeline:
/// 1. NFKC (width and compatibility folding)
/// 2. Lowercase
/// 3. Invisible or unusual whitespace to a single space
/// 4. Ellipsis runs to a space
/// 5. Locale letter folding (`ß`, `ä`, `ö`, `ü`)
/// 6. Street-suffix folding
/// 7. Dashes to spaces
/// 8. Punctuation and quotes to spaces
/// 9. Strip a trailing postal-code locality clause
/// 10. Collapse whitespace and trim
///
/// Total over all input; `normalize(normalize(s)) == normalize(s)`.
#[must_use]
pub fn normalize(input: &str) -> String {
    let compat: String = input.nfkc().collect();
    let lower = compat.to_lowercase();
    let spaced = INVISIBLE_WHITESPACE_RE.replace_all(&lower, " ");
    let no_ellipsis = ELLIPSIS_RE.replace_all(&spaced, " ");
    let folded = synonyms::fold_letters(&no_ellipsis);
    let suffixed = synonyms::fold_street_suffix(&folded);
    let no_dash = DASH_RE.replace_all(&suffixed, " ");
    let no_punct = PUNCTUATION_RE.replace_all(&no_dash, " ");
    let no_locality = TRAILING_LOCALITY_RE.replace(&no_punct, "");
    collapse_whitespace(&no_locality)
}

/// Builds the sort key for a human-readable label.
///
/// Lighter than [`normalize`]: no punctuation or suffix changes, only
/// case, width and letter folding, so `Ärztehaus` sorts as `aerztehaus`.
#[must_use]
pub fn collation_key(label: &str) -> String {
    let compat: String = label.nfkc().collect();
    collapse_whitespace(&synonyms::fold_letters(&compat.to_lowercase()))
}

/// Collapses every whitespace run into one ASCII space and trims.
#[must_use]
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_collapses_whitespace() {
        assert_eq!(normalize("  ELM   Street  12 "), "elm street 12");
    }

    #[test]
    fn folds_full_width_characters() {
        assert_eq!(normalize("Ｅｌｍ Ｓｔｒｅｅｔ １２"), "elm street 12");
    }

    #[test]
    fn replaces_invisible_whitespace() {
        assert_eq!(normalize("Elm\u{00A0}Street\u{200B}12"), "elm street 12");
        assert_eq!(normalize("Elm\u{3000}Street\t12"), "elm street 12");
    }

    #[test]
    fn collapses_ellipsis_runs() {
        assert_eq!(normalize("Elm Street ..."), "elm street");
        assert_eq!(normalize("Elm Str…"), "elm str");
        assert_eq!(normalize("Elm Street 12....."), "elm street 12");
    }

    #[test]
    fn folds_locale_letters() {
        assert_eq!(normalize("Müllerweg 3"), "muellerweg 3");
        assert_eq!(normalize("GRÖẞE ALLEE 1"), "groesse allee 1");
    }

    #[test]
    fn folds_every_street_suffix_spelling() {
        let expected = "haupt str 5";
        assert_eq!(normalize("Hauptstraße 5"), expected);
        assert_eq!(normalize("Hauptstrasse 5"), expected);
        assert_eq!(normalize("Hauptstr. 5"), expected);
        assert_eq!(normalize("Hauptstr 5"), expected);
        assert_eq!(normalize("Haupt Straße 5"), expected);
        assert_eq!(normalize("Haupt-Str. 5"), expected);
        assert_eq!(normalize("HAUPTSTRASSE 5"), expected);
    }

    #[test]
    fn replaces_dashes() {
        assert_eq!(normalize("Am Rhein\u{2013}Ufer 4"), "am rhein ufer 4");
        assert_eq!(normalize("Oak\u{2212}Lane 2"), "oak lane 2");
    }

    #[test]
    fn replaces_punctuation_and_quotes() {
        assert_eq!(normalize("\"Elm\" Street, 12; (rear)"), "elm street 12 rear");
        assert_eq!(normalize("St. Peter’s Weg 1"), "st peter s weg 1");
    }

    #[test]
    fn strips_postal_locality_clause() {
        assert_eq!(normalize("Hauptstraße 5, 10115 Berlin"), "haupt str 5");
        assert_eq!(normalize("Hauptstraße 5, D-10115 Berlin"), "haupt str 5");
        assert_eq!(normalize("Ringweg 2 8010 Graz Innere Stadt"), "ringweg 2");
    }

    #[test]
    fn keeps_postal_code_without_words() {
        assert_eq!(normalize("Postfach 10115"), "postfach 10115");
    }

    #[test]
    fn keeps_short_numbers_before_a_locality() {
        assert_eq!(normalize("Elm Street 12 Metroville"), "elm street 12 metroville");
    }

    #[test]
    fn handles_empty_and_blank_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \u{00A0} "), "");
        assert_eq!(normalize("..."), "");
    }

    #[test]
    fn is_idempotent() {
        let inputs = [
            "Hauptstraße 5, 10115 Berlin",
            "Elm Street ...",
            "x 1234 abc 5678 def",
            "a 12345 b 23456 c",
            "Ｈａｕｐｔｓｔｒ．５",
            "Haupt-Str.. 5",
            "(hauptstr)",
            "St.-Anna-Platz 12a",
            "Straße des 17. Juni 100",
            "foo & bar 1234 ab&c 5678 d",
            "Allee\u{2026}\u{2026} 9",
            "",
            "   ",
            "İstanbul Cd 4",
            "strassestrasse",
            "Hauptstrassestraße 5",
            "Elm Street 12\u{00B7}\u{00B7}\u{00B7}",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn builds_collation_key() {
        assert_eq!(collation_key("Ärztehaus  Nord"), "aerztehaus nord");
        assert_eq!(collation_key("Elm Street 12"), "elm street 12");
    }

    #[test]
    fn collapses_whitespace_only() {
        assert_eq!(collapse_whitespace(" a \t b\n"), "a b");
    }
}
