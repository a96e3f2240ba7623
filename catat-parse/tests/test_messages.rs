use catat_core::{Direction, ParserTables};
use catat_parse::{MessageParser, ParseError, normalize};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

/// The help text examples of the chat bot, end to end.
#[test]
fn test_help_examples() {
    let parser = MessageParser::new(ParserTables::default()).unwrap();

    let cases: &[(&str, Direction, Decimal, &str, &str, Option<NaiveDate>)] = &[
        ("Uang masuk 50k", Direction::Income, dec!(50000), "Income", "Income", None),
        ("Uang keluar 20k", Direction::Expense, dec!(20000), "Other", "Expense", None),
        ("Beli jajan 10k", Direction::Expense, dec!(10000), "Food", "jajan", None),
        (
            "Beli makanan 20k tanggal 5",
            Direction::Expense,
            dec!(20000),
            "Food",
            "makanan",
            NaiveDate::from_ymd_opt(2026, 10, 5),
        ),
        (
            "Bayar listrik 150rb tgl 10 januari",
            Direction::Expense,
            dec!(150000),
            "Bills",
            "listrik",
            NaiveDate::from_ymd_opt(2026, 1, 10),
        ),
        ("Terima gaji 5jt", Direction::Income, dec!(5000000), "Income", "gaji", None),
        ("Ojek 15rb", Direction::Expense, dec!(15000), "Transport", "ojek", None),
    ];

    for (text, direction, amount, category, description, date) in cases {
        let p = parser
            .parse_message(text, today())
            .unwrap_or_else(|e| panic!("{text}: {e}"));
        assert_eq!(p.direction, *direction, "{text}");
        assert_eq!(p.amount, *amount, "{text}");
        assert_eq!(p.category, *category, "{text}");
        assert_eq!(p.description, *description, "{text}");
        assert_eq!(p.explicit_date, *date, "{text}");
    }
}

#[test]
fn test_grouping_separators_are_stripped() {
    for raw in ["2.452.382", "2,452,382", "1.000.000", "10,000,000"] {
        let expected: Decimal = raw.replace(['.', ','], "").parse().unwrap();
        assert_eq!(normalize(raw).unwrap(), expected, "{raw}");
    }
}

#[test]
fn test_custom_month_table() {
    let mut tables = ParserTables::default();
    tables.month_names = [
        "january", "february", "march", "april", "may", "june", "july", "august", "september",
        "october", "november", "december",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    let parser = MessageParser::new(tables).unwrap();

    let p = parser.parse_message("kopi 25k tgl 3 March", today()).unwrap();
    assert_eq!(p.explicit_date, NaiveDate::from_ymd_opt(2026, 3, 3));
}

#[test]
fn test_chatter_is_not_a_transaction() {
    let parser = MessageParser::new(ParserTables::default()).unwrap();
    assert_eq!(
        parser.parse_message("makasih ya", today()).unwrap_err(),
        ParseError::NoAmountFound
    );
}
