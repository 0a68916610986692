//! Scalar parsing for ledger exports.
//!
//! CSV exports deliver every value as text, often German-formatted
//! (`1.234,56 €`); JSON exports mix numbers and strings. These helpers
//! accept both and return `None` for anything they cannot read.

/// Characters dropped from amount strings before parsing.
const AMOUNT_NOISE: &[char] = &['€', '$', '\'', '\u{00A0}', '\u{202F}', ' '];

/// Parses a monetary amount.
///
/// With `decimal_comma`, `.` groups thousands and `,` is the decimal
/// separator. Without it, plain decimal notation is tried first and the
/// German reading is the fallback for strings containing a comma.
#[must_use]
pub fn parse_amount(s: &str, decimal_comma: bool) -> Option<f64> {
    let cleaned: String = s
        .trim()
        .trim_end_matches("EUR")
        .chars()
        .filter(|c| !AMOUNT_NOISE.contains(c))
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    if decimal_comma {
        return parse_decimal_comma(&cleaned);
    }

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .or_else(|| {
            cleaned
                .contains(',')
                .then(|| parse_decimal_comma(&cleaned))
                .flatten()
        })
}

/// Parses `1.234,56` style numbers.
fn parse_decimal_comma(s: &str) -> Option<f64> {
    s.replace('.', "")
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parses a year. Accepts integers and integral decimals (`2023.0`).
#[must_use]
pub fn parse_year(s: &str) -> Option<i32> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(year) = trimmed.parse::<i32>() {
        return Some(year);
    }
    year_from_f64(trimmed.parse::<f64>().ok()?)
}

/// Converts an integral float to a year.
#[must_use]
pub fn year_from_f64(value: f64) -> Option<i32> {
    if value.fract() != 0.0 || value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    Some(value as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_amounts() {
        assert_eq!(parse_amount("1234.56", false), Some(1234.56));
        assert_eq!(parse_amount(" -12 ", false), Some(-12.0));
        assert_eq!(parse_amount("0", false), Some(0.0));
    }

    #[test]
    fn falls_back_to_german_amounts() {
        assert_eq!(parse_amount("1.234,56", false), Some(1234.56));
        assert_eq!(parse_amount("12,5", false), Some(12.5));
        assert_eq!(parse_amount("1.234,56 €", false), Some(1234.56));
        assert_eq!(parse_amount("99 EUR", false), Some(99.0));
    }

    #[test]
    fn honors_decimal_comma() {
        assert_eq!(parse_amount("1.234", true), Some(1234.0));
        assert_eq!(parse_amount("1.234", false), Some(1.234));
        assert_eq!(parse_amount("1.234.567,8", true), Some(1_234_567.8));
    }

    #[test]
    fn rejects_unreadable_amounts() {
        assert_eq!(parse_amount("", false), None);
        assert_eq!(parse_amount("  ", false), None);
        assert_eq!(parse_amount("n/a", false), None);
        assert_eq!(parse_amount("inf", false), None);
    }

    #[test]
    fn parses_years() {
        assert_eq!(parse_year("2023"), Some(2023));
        assert_eq!(parse_year(" 2023.0 "), Some(2023));
        assert_eq!(parse_year("2023.5"), None);
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("zwanzig"), None);
    }
}
