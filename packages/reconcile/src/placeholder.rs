//! Placeholder and shadow-row recognition.
//!
//! The upstream ledger carries test fixtures ("rls test object") that must
//! never reach the consumer, and internally tagged shadow duplicates
//! ("Birkenweg 7 (Schattenkopie)") whose marker must never be displayed.

use regex::Regex;
use std::sync::LazyLock;

use crate::normalize::collapse_whitespace;

/// A label starting with one of these is a test fixture.
pub const PLACEHOLDER_PREFIXES: &[&str] = &["rls test", "zz test", "debug"];

/// A label containing one of these as a whole word is a test fixture.
pub const PLACEHOLDER_TOKENS: &[&str] = &["testobjekt", "test object", "dummy"];

/// Markers tagging a row as a non-canonical shadow duplicate.
pub const SHADOW_MARKERS: &[&str] = &["shadow copy", "shadow duplicate", "schattenkopie"];

/// Separator tolerated between the words of a placeholder phrase.
const PLACEHOLDER_SEPARATOR: &str = r"[\s_\-]+";

/// Separator tolerated between the words of a shadow marker. Zero width
/// so `shadowcopy` is recognized too.
const SHADOW_SEPARATOR: &str = r"[\s_\-\x{2010}-\x{2015}]*";

/// Anything that is not a letter or digit. Underscores count as
/// boundaries here, unlike `\b`.
const BOUNDARY: &str = r"[^\p{L}\p{N}]";

static PLACEHOLDER_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = phrase_alternation(PLACEHOLDER_PREFIXES, PLACEHOLDER_SEPARATOR);
    Regex::new(&format!(r"(?i)^\s*(?:{alternation})(?:$|{BOUNDARY})")).expect("valid regex")
});

static PLACEHOLDER_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = phrase_alternation(PLACEHOLDER_TOKENS, PLACEHOLDER_SEPARATOR);
    Regex::new(&format!(
        r"(?i)(?:^|{BOUNDARY})(?:{alternation})(?:$|{BOUNDARY})"
    ))
    .expect("valid regex")
});

/// Bare shadow marker. Captures the boundary characters on either side
/// so a replacement can put them back.
static SHADOW_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = phrase_alternation(SHADOW_MARKERS, SHADOW_SEPARATOR);
    Regex::new(&format!(
        r"(?i)(^|{BOUNDARY})(?:{alternation})($|{BOUNDARY})"
    ))
    .expect("valid regex")
});

/// Like [`BOUNDARY`], but never a parenthesis.
const PAREN_BOUNDARY: &str = r"[^()\p{L}\p{N}]";

/// A parenthetical containing a shadow marker as a whole word.
static SHADOW_PARENTHETICAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = phrase_alternation(SHADOW_MARKERS, SHADOW_SEPARATOR);
    Regex::new(&format!(
        r"(?i)\s*\((?:[^()]*{PAREN_BOUNDARY})?(?:{alternation})(?:{PAREN_BOUNDARY}[^()]*)?\)"
    ))
    .expect("valid regex")
});

/// Separators left dangling at either end after a marker was removed.
static DANGLING_SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\s\-\x{2010}-\x{2015}_,;:/|]+|[\s\-\x{2010}-\x{2015}_,;:/|]+$")
        .expect("valid regex")
});

/// Parentheses emptied by a nested removal.
static EMPTY_PARENS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*\)").expect("valid regex"));

/// Joins escaped phrases into a regex alternation, allowing `separator`
/// between their words.
fn phrase_alternation(phrases: &[&str], separator: &str) -> String {
    phrases
        .iter()
        .map(|phrase| {
            phrase
                .split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(separator)
        })
        .collect::<Vec<_>>()
        .join("|")
}

/// Whether the label follows a test-fixture naming convention.
#[must_use]
pub fn is_placeholder(label: &str) -> bool {
    PLACEHOLDER_PREFIX_RE.is_match(label) || PLACEHOLDER_TOKEN_RE.is_match(label)
}

/// Whether the label carries a shadow-duplicate marker.
#[must_use]
pub fn is_shadow_marked(label: &str) -> bool {
    SHADOW_MARKER_RE.is_match(label)
}

/// Removes every shadow marker from a label.
///
/// A parenthetical holding the marker goes entirely; otherwise the bare
/// marker is cut. Whitespace is collapsed either way. Idempotent.
#[must_use]
pub fn strip_shadow_marker(label: &str) -> String {
    let mut out = label.to_string();

    // Removing a marker or an emptied pair of parentheses can join the
    // halves of another marker, so clean up on every round.
    while SHADOW_MARKER_RE.is_match(&out) {
        out = if SHADOW_PARENTHETICAL_RE.is_match(&out) {
            SHADOW_PARENTHETICAL_RE.replace_all(&out, " ").into_owned()
        } else {
            SHADOW_MARKER_RE.replace_all(&out, "${1} ${2}").into_owned()
        };
        out = EMPTY_PARENS_RE.replace_all(&out, " ").into_owned();
        out = DANGLING_SEPARATOR_RE.replace_all(&out, "").into_owned();
    }

    collapse_whitespace(&out)
}
