//! Direction and category rules.
//!
//! Both classifiers look at the whole message, lowercased with whitespace
//! collapsed, and match keywords as substrings. Category rules are walked in
//! table order and the first rule with any hit wins; there is no scoring.

use catat_core::{Direction, ParserTables};

/// Lowercase and collapse runs of whitespace to a single space.
pub fn fold(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn mentions_any(folded: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .any(|k| !k.is_empty() && folded.contains(&fold(k)))
}

/// True when the message reads as money coming in.
pub fn is_inflow(text: &str, tables: &ParserTables) -> bool {
    mentions_any(&fold(text), &tables.inflow_keywords)
}

pub fn classify_direction(text: &str, tables: &ParserTables) -> Direction {
    if is_inflow(text, tables) {
        Direction::Income
    } else {
        Direction::Expense
    }
}

/// First matching category rule, or the catch-all.
pub fn classify_category<'t>(text: &str, tables: &'t ParserTables) -> &'t str {
    let folded = fold(text);
    tables
        .category_rules
        .iter()
        .find(|rule| mentions_any(&folded, &rule.keywords))
        .map(|rule| rule.category.as_str())
        .unwrap_or_else(|| tables.fallback_category())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catat_core::CategoryRule;

    fn tables() -> ParserTables {
        ParserTables::default()
    }

    #[test]
    fn test_direction_inflow_keywords() {
        let t = tables();
        assert_eq!(classify_direction("terima gaji 5jt", &t), Direction::Income);
        assert_eq!(classify_direction("Uang   Masuk 50k", &t), Direction::Income);
        assert_eq!(classify_direction("dapet bonus 1jt", &t), Direction::Income);
        assert_eq!(classify_direction("uang keluar 20k", &t), Direction::Expense);
        assert_eq!(classify_direction("ojek 15rb", &t), Direction::Expense);
    }

    #[test]
    fn test_category_table() {
        let t = tables();
        assert_eq!(classify_category("beli jajan 10k", &t), "Food");
        assert_eq!(classify_category("ojek 15rb", &t), "Transport");
        assert_eq!(classify_category("checkout shopee 120rb", &t), "Shopping");
        assert_eq!(classify_category("isi pulsa 50k", &t), "Bills");
        assert_eq!(classify_category("terima gaji 5jt", &t), "Income");
        assert_eq!(classify_category("sumbangan 20k", &t), "Other");
    }

    #[test]
    fn test_first_rule_wins_over_later_matches() {
        let t = tables();
        // "beli" is Shopping, "token" and "listrik" are Bills; Shopping comes first.
        assert_eq!(classify_category("beli token listrik 100k", &t), "Shopping");
        // "kopi" (Food) beats "grab" (Transport).
        assert_eq!(classify_category("grab kopi 30k", &t), "Food");
    }

    #[test]
    fn test_rule_order_is_data() {
        let mut t = tables();
        t.category_rules.insert(
            0,
            CategoryRule {
                category: "Coffee".to_string(),
                keywords: vec!["kopi".to_string()],
            },
        );
        assert_eq!(classify_category("grab kopi 30k", &t), "Coffee");
    }

    #[test]
    fn test_multi_word_keyword_tolerates_spacing() {
        let t = tables();
        assert!(is_inflow("UANG\tmasuk 10k", &t));
    }
}
