//! Street-number detection and base-key reduction.
//!
//! The base key is the canonical key with its trailing locality and
//! trailing house number removed. `"Elm Street 12 Metroville"` and
//! `"Elm Street ..."` share the base key `elm street` and can therefore
//! meet in the loose deduplication pass.

use regex::Regex;
use std::sync::LazyLock;

use crate::locality::extract_locality;
use crate::normalize::{collapse_whitespace, normalize};

/// Trailing 1-4 digit house number with an optional letter, on a
/// normalized key.
static TRAILING_IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)\d{1,4}[a-z]?$").expect("valid regex"));

/// A plausible house number anywhere in a raw label.
static STREET_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b\d{1,4}[a-z]?\b").expect("valid regex"));

/// Builds the base key of a label.
#[must_use]
pub fn base_key(label: &str) -> String {
    reduce_to_base(&normalize(label), &extract_locality(label))
}

/// Reduces an already-normalized key to its base form, given the
/// locality extracted from the original label.
#[must_use]
pub fn reduce_to_base(canonical: &str, locality: &str) -> String {
    let without_locality = if locality.is_empty() {
        canonical.to_string()
    } else {
        strip_trailing_token(canonical, &normalize(locality))
    };
    collapse_whitespace(&strip_trailing_identifier(&without_locality))
}

/// Removes a trailing house number (`12`, `12a`) from a normalized key.
#[must_use]
pub fn strip_trailing_identifier(key: &str) -> String {
    TRAILING_IDENTIFIER_RE.replace(key, "").trim_end().to_string()
}

/// Whether the label contains a plausible house number anywhere.
#[must_use]
pub fn has_street_number(label: &str) -> bool {
    STREET_NUMBER_RE.is_match(label)
}

/// Removes `token` from the end of `key` when it forms whole trailing
/// words; otherwise returns `key` unchanged.
fn strip_trailing_token(key: &str, token: &str) -> String {
    if token.is_empty() {
        return key.to_string();
    }
    if key == token {
        return String::new();
    }
    key.strip_suffix(token)
        .and_then(|rest| rest.strip_suffix(' '))
        .map_or_else(|| key.to_string(), ToString::to_string)
}
