//! Structured entry commands: `<amount> <category> <description...>`.

use rust_decimal::Decimal;

use crate::amount::normalize;
use crate::error::ParseError;

pub const STRUCTURED_USAGE: &str = "<amount> <category> <description>";

/// Arguments of an explicit income/expense command
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredEntry {
    pub amount: Decimal,
    /// Taken verbatim, may be outside the default set
    pub category: String,
    pub description: String,
}

/// Parse `"2.452.382 Gaji Gaji Januari"` style arguments.
pub fn parse_structured(args: &str) -> Result<StructuredEntry, ParseError> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    if parts.len() < 3 {
        return Err(ParseError::Usage(STRUCTURED_USAGE));
    }

    Ok(StructuredEntry {
        amount: normalize(parts[0])?,
        category: parts[1].to_string(),
        description: parts[2..].join(" "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_structured() {
        let e = parse_structured("2.452.382 Gaji Gaji Januari").unwrap();
        assert_eq!(e.amount, dec!(2452382));
        assert_eq!(e.category, "Gaji");
        assert_eq!(e.description, "Gaji Januari");
    }

    #[test]
    fn test_structured_needs_three_parts() {
        assert_eq!(
            parse_structured("50000 Makanan").unwrap_err(),
            ParseError::Usage(STRUCTURED_USAGE)
        );
    }

    #[test]
    fn test_structured_rejects_bad_amount() {
        assert!(matches!(
            parse_structured("nol Makanan makan siang"),
            Err(ParseError::InvalidAmount(_))
        ));
    }
}
