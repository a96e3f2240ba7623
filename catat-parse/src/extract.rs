//! Free-text transaction extraction.
//!
//! "beli jajan 10k", "terima gaji 5jt", "bayar listrik 150rb tgl 10 januari":
//! strip one leading filler verb, take the first numeral (plus magnitude
//! suffix) as the amount, everything before it as the description, and pick
//! up an optional "tgl <day> [month]" date.

use chrono::{Datelike, NaiveDate};
use catat_core::{Direction, ParserTables, time::rolled_date};
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::amount::{MAGNITUDE_SUFFIXES, normalize};
use crate::classify::{classify_category, classify_direction, fold};
use crate::error::ParseError;

/// Structured result of reading one message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedTransaction {
    pub direction: Direction,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    /// Set only when the message names a day
    pub explicit_date: Option<NaiveDate>,
}

/// Parser bound to one set of keyword tables
#[derive(Debug, Clone)]
pub struct MessageParser {
    tables: ParserTables,
    amount_re: Regex,
    date_re: Regex,
}

impl MessageParser {
    pub fn new(tables: ParserTables) -> Result<Self, regex::Error> {
        let amount_re = Regex::new(&format!(
            r"([0-9]+(?:[.,][0-9]+)*)\s*(?:({})\b)?",
            MAGNITUDE_SUFFIXES.join("|")
        ))?;

        let mut months: Vec<String> = tables.month_names.iter().map(|m| fold(m)).collect();
        months.sort_by_key(|m| std::cmp::Reverse(m.len()));
        let months: Vec<String> = months.iter().map(|m| regex::escape(m)).collect();
        let date_re = Regex::new(&format!(
            r"\b(?:tanggal|tgl|tg)\s+([0-9]{{1,2}})(?:\s+({}))?",
            months.join("|")
        ))?;

        Ok(Self {
            tables,
            amount_re,
            date_re,
        })
    }

    pub fn tables(&self) -> &ParserTables {
        &self.tables
    }

    /// Read a free-text message. `today` anchors dates that omit month or year.
    pub fn parse_message(&self, text: &str, today: NaiveDate) -> Result<ParsedTransaction, ParseError> {
        let folded = fold(text);
        let stripped = self.strip_filler(&folded);

        // First numeral wins, even when it belongs to a leading date phrase.
        let caps = self
            .amount_re
            .captures(stripped)
            .ok_or(ParseError::NoAmountFound)?;
        let (Some(whole), Some(numeral)) = (caps.get(0), caps.get(1)) else {
            return Err(ParseError::NoAmountFound);
        };
        let suffix = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        let amount = normalize(&format!("{}{}", numeral.as_str(), suffix))?;

        let direction = classify_direction(text, &self.tables);
        let mut description = stripped[..whole.start()].trim().to_string();
        if description.is_empty() {
            description = direction.default_label().to_string();
        }

        Ok(ParsedTransaction {
            direction,
            amount,
            category: classify_category(text, &self.tables).to_string(),
            description,
            explicit_date: self.explicit_date(text, today),
        })
    }

    /// "tanggal 5", "tgl 10 januari", "tg 3 mei": day of the given (or current)
    /// month, current year.
    pub fn explicit_date(&self, text: &str, today: NaiveDate) -> Option<NaiveDate> {
        let folded = fold(text);
        let caps = self.date_re.captures(&folded)?;
        let day: u32 = caps.get(1)?.as_str().parse().ok()?;
        let month0 = match caps.get(2) {
            Some(name) => self
                .tables
                .month_names
                .iter()
                .position(|m| fold(m) == name.as_str())? as u32,
            None => today.month0(),
        };
        rolled_date(today.year(), month0, day)
    }

    /// Drop at most one leading filler verb ("beli", "bayar", "uang masuk", ...).
    fn strip_filler<'a>(&self, folded: &'a str) -> &'a str {
        for filler in &self.tables.filler_words {
            let filler = fold(filler);
            if filler.is_empty() {
                continue;
            }
            if let Some(rest) = folded.strip_prefix(filler.as_str()) {
                if let Some(rest) = rest.strip_prefix(' ') {
                    return rest;
                }
            }
        }
        folded
    }
}

/// Cheap gate the chat layer applies before parsing: free text with a digit.
pub fn looks_like_transaction(text: &str) -> bool {
    let text = text.trim();
    !text.starts_with('/') && text.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn parser() -> MessageParser {
        MessageParser::new(ParserTables::default()).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_jajan_expense() {
        let p = parser().parse_message("beli jajan 10k", today()).unwrap();
        assert_eq!(p.direction, Direction::Expense);
        assert_eq!(p.amount, dec!(10000));
        assert_eq!(p.category, "Food");
        assert_eq!(p.description, "jajan");
        assert_eq!(p.explicit_date, None);
    }

    #[test]
    fn test_salary_income() {
        let p = parser().parse_message("terima gaji 5jt", today()).unwrap();
        assert_eq!(p.direction, Direction::Income);
        assert_eq!(p.amount, dec!(5000000));
        assert_eq!(p.category, "Income");
        assert_eq!(p.description, "gaji");
    }

    #[test]
    fn test_bill_with_explicit_date() {
        let p = parser()
            .parse_message("bayar listrik 150rb tgl 10 januari", today())
            .unwrap();
        assert_eq!(p.direction, Direction::Expense);
        assert_eq!(p.amount, dec!(150000));
        assert_eq!(p.category, "Bills");
        assert_eq!(p.description, "listrik");
        assert_eq!(p.explicit_date, NaiveDate::from_ymd_opt(2026, 1, 10));
    }

    #[test]
    fn test_date_without_month_uses_current_month() {
        let p = parser()
            .parse_message("Beli makanan 20k tanggal 5", today())
            .unwrap();
        assert_eq!(p.explicit_date, NaiveDate::from_ymd_opt(2026, 10, 5));
        assert_eq!(p.description, "makanan");
    }

    #[test]
    fn test_leading_date_number_is_the_amount() {
        let p = parser().parse_message("tgl 5 kopi 20k", today()).unwrap();
        assert_eq!(p.amount, dec!(5));
        assert_eq!(p.explicit_date, NaiveDate::from_ymd_opt(2026, 10, 5));
        assert_eq!(p.description, "tgl");

        let p = parser()
            .parse_message("tgl 10 januari bayar listrik 150rb", today())
            .unwrap();
        assert_eq!(p.amount, dec!(10));
        assert_eq!(p.explicit_date, NaiveDate::from_ymd_opt(2026, 1, 10));
        assert_eq!(p.category, "Bills");
    }

    #[test]
    fn test_empty_description_gets_direction_label() {
        let p = parser().parse_message("uang masuk 50k", today()).unwrap();
        assert_eq!(p.direction, Direction::Income);
        assert_eq!(p.description, "Income");

        let p = parser().parse_message("20k", today()).unwrap();
        assert_eq!(p.direction, Direction::Expense);
        assert_eq!(p.description, "Expense");
    }

    #[test]
    fn test_only_first_numeral_counts() {
        let p = parser().parse_message("ojek 15rb tip 5rb", today()).unwrap();
        assert_eq!(p.amount, dec!(15000));
        assert_eq!(p.category, "Transport");
        assert_eq!(p.description, "ojek");
    }

    #[test]
    fn test_grouped_amount_in_text() {
        let p = parser().parse_message("belanja bulanan 2.452.382", today()).unwrap();
        assert_eq!(p.amount, dec!(2452382));
        assert_eq!(p.description, "bulanan");
    }

    #[test]
    fn test_suffix_needs_word_boundary() {
        // "10 kopi" is ten of something, not ten thousand
        let p = parser().parse_message("10 kopi", today()).unwrap();
        assert_eq!(p.amount, dec!(10));
    }

    #[test]
    fn test_filler_stripped_once() {
        let p = parser().parse_message("beli beli 5k", today()).unwrap();
        assert_eq!(p.description, "beli");
    }

    #[test]
    fn test_no_amount() {
        let err = parser().parse_message("halo apa kabar", today()).unwrap_err();
        assert_eq!(err, ParseError::NoAmountFound);
    }

    #[test]
    fn test_zero_amount_is_invalid() {
        let err = parser().parse_message("jajan 0", today()).unwrap_err();
        assert!(matches!(err, ParseError::InvalidAmount(_)));
    }

    #[test]
    fn test_looks_like_transaction() {
        assert!(looks_like_transaction("ojek 15rb"));
        assert!(!looks_like_transaction("/hapus 3"));
        assert!(!looks_like_transaction("halo"));
    }
}
