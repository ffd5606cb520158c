//! Input coercion for credit and marks fields.
//!
//! Numeric fields never reject input: text is read with integer-prefix
//! semantics and then clamped. Whether marks count as entered looks at the
//! decimal reading instead. Pure functions, no I/O.

use std::str::FromStr;

use thiserror::Error;

use crate::grade::MAX_MARKS;

/// Read the leading base-10 integer of `text`.
///
/// Leading whitespace is skipped, one optional `+` or `-` sign is accepted,
/// and parsing stops at the first non-digit. Returns `None` when no digit
/// follows. Values beyond `i64` saturate.
///
/// - `"42"` → `Some(42)`
/// - `"  7 credits"` → `Some(7)`
/// - `"-5"` → `Some(-5)`
/// - `"abc"`, `""`, `"-"` → `None`
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let magnitude = rest[..digits_end].bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });

    Some(if negative { -magnitude } else { magnitude })
}

/// Coerce credits text: unparseable or non-positive values become unset.
pub fn coerce_credits(text: &str) -> Option<u32> {
    let credits = parse_int_prefix(text).unwrap_or(0).max(0);
    if credits == 0 {
        None
    } else {
        Some(u32::try_from(credits).unwrap_or(u32::MAX))
    }
}

/// Coerce marks text into [0, 100]; unparseable text reads as 0.
pub fn coerce_marks(text: &str) -> u8 {
    let marks = parse_int_prefix(text)
        .unwrap_or(0)
        .clamp(0, i64::from(MAX_MARKS));
    // Clamped above, always fits.
    marks as u8
}

/// Read the leading decimal number of `text`, fraction and exponent included.
///
/// Like [`parse_int_prefix`], whitespace and a sign may lead and parsing
/// stops at the first character that cannot extend the number. A leading
/// `Infinity` reads as infinite. Returns `None` when no digit is found.
///
/// - `"0.5"`, `".5"` → `Some(0.5)`
/// - `"1e2x"` → `Some(100.0)`
/// - `"1e"`, `"5."` → `Some(1.0)`, `Some(5.0)`
/// - `"."`, `"e5"` → `None`
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();

    let mut end = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            end = 1;
            true
        }
        Some(b'+') => {
            end = 1;
            false
        }
        _ => false,
    };

    if trimmed[end..].starts_with("Infinity") {
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let count_digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let int_digits = count_digits(end);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(end + 1);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    trimmed[..end].parse().ok()
}

// ============================================================================
// SUBJECT SPECS (command line)
// ============================================================================

/// A subject given on the command line as `CREDITS:MARKS[:NAME]`.
///
/// Credits and marks are kept as text so they go through the same coercion
/// as interactive edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectSpec {
    pub credits: String,
    pub marks: String,
    pub name: String,
}

/// Malformed subject spec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("invalid subject `{0}`: expected CREDITS:MARKS[:NAME]")]
    MissingSeparator(String),
}

impl FromStr for SubjectSpec {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let credits = parts.next().unwrap_or_default();
        let marks = parts
            .next()
            .ok_or_else(|| SpecError::MissingSeparator(s.to_string()))?;
        let name = parts.next().unwrap_or_default();

        Ok(SubjectSpec {
            credits: credits.trim().to_string(),
            marks: marks.trim().to_string(),
            name: name.trim().to_string(),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // --- parse_int_prefix ---

    #[test]
    fn parses_plain_integers() {
        assert_eq!(parse_int_prefix("42"), Some(42));
        assert_eq!(parse_int_prefix("0"), Some(0));
        assert_eq!(parse_int_prefix("+8"), Some(8));
        assert_eq!(parse_int_prefix("-5"), Some(-5));
    }

    #[test]
    fn ignores_trailing_garbage() {
        assert_eq!(parse_int_prefix("12abc"), Some(12));
        assert_eq!(parse_int_prefix("3.9"), Some(3));
        assert_eq!(parse_int_prefix("  7 credits"), Some(7));
    }

    #[test]
    fn rejects_text_without_leading_digits() {
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix("x12"), None);
        assert_eq!(parse_int_prefix("--3"), None);
    }

    #[test]
    fn saturates_huge_values() {
        assert_eq!(parse_int_prefix("99999999999999999999999"), Some(i64::MAX));
    }

    // --- parse_float_prefix ---

    #[test]
    fn float_prefix_reads_fractions() {
        assert_eq!(parse_float_prefix("0.5"), Some(0.5));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("-.25"), Some(-0.25));
        assert_eq!(parse_float_prefix("5."), Some(5.0));
        assert_eq!(parse_float_prefix("  72.5 marks"), Some(72.5));
    }

    #[test]
    fn float_prefix_reads_exponents_when_complete() {
        assert_eq!(parse_float_prefix("1e2x"), Some(100.0));
        assert_eq!(parse_float_prefix("2E-1"), Some(0.2));
        assert_eq!(parse_float_prefix("1e"), Some(1.0));
        assert_eq!(parse_float_prefix("1e+"), Some(1.0));
    }

    #[test]
    fn float_prefix_rejects_text_without_digits() {
        assert_eq!(parse_float_prefix(""), None);
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("-"), None);
        assert_eq!(parse_float_prefix("e5"), None);
        assert_eq!(parse_float_prefix("abc"), None);
    }

    #[test]
    fn float_prefix_reads_infinity() {
        assert_eq!(parse_float_prefix("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_float_prefix("-Infinity"), Some(f64::NEG_INFINITY));
    }

    // --- coercion ---

    #[test]
    fn credits_zero_negative_and_empty_are_unset() {
        assert_eq!(coerce_credits("0"), None);
        assert_eq!(coerce_credits("-3"), None);
        assert_eq!(coerce_credits(""), None);
        assert_eq!(coerce_credits("abc"), None);
    }

    #[test]
    fn positive_credits_are_kept() {
        assert_eq!(coerce_credits("4"), Some(4));
        assert_eq!(coerce_credits("04"), Some(4));
        assert_eq!(coerce_credits("99999999999"), Some(u32::MAX));
    }

    #[test]
    fn marks_are_clamped() {
        assert_eq!(coerce_marks("150"), 100);
        assert_eq!(coerce_marks("-5"), 0);
        assert_eq!(coerce_marks("abc"), 0);
        assert_eq!(coerce_marks("55"), 55);
    }

    // --- SubjectSpec ---

    #[test]
    fn spec_with_name() {
        let spec: SubjectSpec = "4:90:Physics".parse().unwrap();
        assert_eq!(spec.credits, "4");
        assert_eq!(spec.marks, "90");
        assert_eq!(spec.name, "Physics");
    }

    #[test]
    fn spec_without_name() {
        let spec: SubjectSpec = "2:55".parse().unwrap();
        assert_eq!(spec.name, "");
    }

    #[test]
    fn spec_name_may_contain_colons() {
        let spec: SubjectSpec = "3:70:Lab: Circuits".parse().unwrap();
        assert_eq!(spec.name, "Lab: Circuits");
    }

    #[test]
    fn spec_without_separator_is_rejected() {
        let err = "490".parse::<SubjectSpec>().unwrap_err();
        assert_eq!(err, SpecError::MissingSeparator("490".into()));
        assert!(err.to_string().contains("CREDITS:MARKS"));
    }
}
