//! Amount normalization for numerals that use `.` and `,` interchangeably.
//!
//! Chat messages mix "2.452.382" (grouping) with "50.5" (decimal) and the
//! comma variants of both. The rule is a fixed heuristic, not a locale:
//!
//! 1. a separator that appears more than once, or once with three or more
//!    characters after it, groups thousands and is removed;
//! 2. a remaining single `.` is a decimal point;
//! 3. a remaining single `,` is a decimal comma.
//!
//! An optional magnitude suffix (`k`/`rb`/`ribu` = 1e3, `jt`/`juta` = 1e6)
//! multiplies the result.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::ParseError;

/// Suffixes recognized after a numeral, longest first so regex alternation
/// never stops at a prefix.
pub const MAGNITUDE_SUFFIXES: &[&str] = &["ribu", "juta", "rb", "jt", "k"];

/// Multiplier for a (lowercased) suffix; empty means none.
pub fn suffix_multiplier(suffix: &str) -> Option<Decimal> {
    match suffix {
        "" => Some(Decimal::ONE),
        "k" | "rb" | "ribu" => Some(Decimal::ONE_THOUSAND),
        "jt" | "juta" => Some(Decimal::from(1_000_000u32)),
        _ => None,
    }
}

/// Turn a raw token like `"2.452.382"`, `"50,5"` or `"150rb"` into a positive amount.
pub fn normalize(raw: &str) -> Result<Decimal, ParseError> {
    let invalid = || ParseError::InvalidAmount(raw.to_string());

    let trimmed = raw.trim();
    let split = trimmed
        .find(|c: char| c.is_alphabetic())
        .unwrap_or(trimmed.len());
    let (numeral, suffix) = trimmed.split_at(split);
    let numeral = numeral.trim_end();
    let multiplier = suffix_multiplier(&suffix.to_lowercase()).ok_or_else(invalid)?;

    if numeral.is_empty()
        || !numeral
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
    {
        return Err(invalid());
    }

    let cleaned = clean_numeral(numeral).ok_or_else(invalid)?;
    let value = Decimal::from_str(&cleaned).map_err(|_| invalid())?;
    let amount = value.checked_mul(multiplier).ok_or_else(invalid)?;

    if amount <= Decimal::ZERO {
        return Err(invalid());
    }
    Ok(amount.normalize())
}

/// Apply the separator rules, returning a string `Decimal` can parse.
fn clean_numeral(numeral: &str) -> Option<String> {
    let mut s = numeral.to_string();

    if groups_thousands(&s, '.') {
        s.retain(|c| c != '.');
    }
    if groups_thousands(&s, ',') {
        s.retain(|c| c != ',');
    }

    match (s.contains('.'), s.contains(',')) {
        (true, true) => None,
        (false, true) => Some(s.replacen(',', ".", 1)),
        _ => Some(s),
    }
}

fn groups_thousands(s: &str, sep: char) -> bool {
    match s.matches(sep).count() {
        0 => false,
        1 => s.find(sep).is_some_and(|i| s.len() - i - 1 >= 3),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_repeated_separator_groups_thousands() {
        assert_eq!(normalize("2.452.382").unwrap(), dec!(2452382));
        assert_eq!(normalize("2,452,382").unwrap(), dec!(2452382));
    }

    #[test]
    fn test_single_separator_with_three_digits_groups() {
        assert_eq!(normalize("1.500").unwrap(), dec!(1500));
        assert_eq!(normalize("25,000").unwrap(), dec!(25000));
    }

    #[test]
    fn test_single_separator_short_tail_is_decimal() {
        assert_eq!(normalize("50.5").unwrap(), dec!(50.5));
        assert_eq!(normalize("50,5").unwrap(), dec!(50.5));
        assert_eq!(normalize("12,75").unwrap(), dec!(12.75));
    }

    #[test]
    fn test_mixed_separators() {
        assert_eq!(normalize("1.234,56").unwrap(), dec!(1234.56));
        assert_eq!(normalize("1,234.56").unwrap(), dec!(1234.56));
    }

    #[test]
    fn test_magnitude_suffixes() {
        assert_eq!(normalize("10k").unwrap(), dec!(10000));
        assert_eq!(normalize("5jt").unwrap(), dec!(5000000));
        assert_eq!(normalize("150rb").unwrap(), dec!(150000));
        assert_eq!(normalize("2 ribu").unwrap(), dec!(2000));
        assert_eq!(normalize("1,5JT").unwrap(), dec!(1500000));
        assert_eq!(normalize("1.5 juta").unwrap(), dec!(1500000));
    }

    #[test]
    fn test_plain_integer() {
        assert_eq!(normalize("5000000").unwrap(), dec!(5000000));
    }

    #[test]
    fn test_rejects_zero_and_garbage() {
        assert!(matches!(normalize("0"), Err(ParseError::InvalidAmount(_))));
        assert!(matches!(normalize("0,00"), Err(ParseError::InvalidAmount(_))));
        assert!(matches!(normalize("-5"), Err(ParseError::InvalidAmount(_))));
        assert!(matches!(normalize("abc"), Err(ParseError::InvalidAmount(_))));
        assert!(matches!(normalize(""), Err(ParseError::InvalidAmount(_))));
        assert!(matches!(normalize("10x"), Err(ParseError::InvalidAmount(_))));
        assert!(matches!(normalize(".,"), Err(ParseError::InvalidAmount(_))));
    }
}
