//! Keyword tables driving the message parser.
//!
//! Everything locale-specific lives here as data: inflow keywords, the ordered
//! category rules, filler verbs and month names. The parser only ever walks
//! these tables in order, so swapping languages is a config change.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// One row of the category table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryRule {
    pub category: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ParserTables {
    /// Seeded into every new ledger. The last entry is the catch-all.
    pub default_categories: Vec<String>,
    pub inflow_keywords: Vec<String>,
    /// Evaluated top to bottom, first match wins
    pub category_rules: Vec<CategoryRule>,
    pub filler_words: Vec<String>,
    /// January first, exactly twelve entries
    pub month_names: Vec<String>,
}

impl ParserTables {
    /// Category used when no rule matches
    pub fn fallback_category(&self) -> &str {
        self.default_categories
            .last()
            .map(String::as_str)
            .unwrap_or(FALLBACK_CATEGORY)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_categories.is_empty() {
            bail!("parser.default_categories must not be empty");
        }
        if self.month_names.len() != 12 {
            bail!(
                "parser.month_names must have 12 entries, found {}",
                self.month_names.len()
            );
        }
        if let Some(rule) = self.category_rules.iter().find(|r| r.keywords.is_empty()) {
            bail!("category rule '{}' has no keywords", rule.category);
        }
        Ok(())
    }
}

pub const FALLBACK_CATEGORY: &str = "Other";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn rule(category: &str, keywords: &[&str]) -> CategoryRule {
    CategoryRule {
        category: category.to_string(),
        keywords: strings(keywords),
    }
}

impl Default for ParserTables {
    fn default() -> Self {
        Self {
            default_categories: strings(&[
                "Food",
                "Transport",
                "Shopping",
                "Bills",
                "Income",
                FALLBACK_CATEGORY,
            ]),
            inflow_keywords: strings(&[
                "uang masuk",
                "terima",
                "dapat",
                "dapet",
                "gaji",
                "bonus",
                "masuk",
            ]),
            category_rules: vec![
                rule(
                    "Food",
                    &[
                        "jajan", "makan", "makanan", "minum", "kopi", "nasi", "soto", "bakso",
                        "warteg", "restoran", "cafe",
                    ],
                ),
                rule(
                    "Transport",
                    &[
                        "ojek", "ojol", "grab", "gojek", "bensin", "parkir", "tol", "transport",
                        "angkot", "bus",
                    ],
                ),
                rule(
                    "Shopping",
                    &["belanja", "beli", "shopping", "tokped", "shopee", "lazada"],
                ),
                rule(
                    "Bills",
                    &[
                        "listrik", "air", "wifi", "internet", "pulsa", "token", "tagihan", "bayar",
                    ],
                ),
                rule(
                    "Income",
                    &[
                        "gaji", "bonus", "terima", "dapat", "dapet", "transfer", "masuk",
                        "uang masuk",
                    ],
                ),
            ],
            filler_words: strings(&[
                "beli",
                "bayar",
                "belanja",
                "buat",
                "untuk",
                "dapat",
                "terima",
                "dapet",
                "uang masuk",
                "uang keluar",
            ]),
            month_names: strings(&[
                "januari",
                "februari",
                "maret",
                "april",
                "mei",
                "juni",
                "juli",
                "agustus",
                "september",
                "oktober",
                "november",
                "desember",
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tables = ParserTables::default();
        tables.validate().unwrap();
        assert_eq!(tables.fallback_category(), "Other");
        assert_eq!(tables.category_rules[0].category, "Food");
        assert_eq!(tables.category_rules[4].category, "Income");
    }

    #[test]
    fn test_validate_rejects_short_month_table() {
        let mut tables = ParserTables::default();
        tables.month_names.pop();
        assert!(tables.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_categories() {
        let tables = ParserTables {
            default_categories: Vec::new(),
            ..ParserTables::default()
        };
        assert!(tables.validate().is_err());
    }
}
