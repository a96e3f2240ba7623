//! catat-core: ledger types, parser keyword tables and shared utilities

pub mod ledger;
pub mod money;
pub mod tables;
pub mod time;

pub use ledger::{
    Balance, CategoryTotal, Direction, Transaction, UserLedger, expense_by_category,
    sort_newest_first,
};
pub use money::format_rupiah;
pub use tables::{CategoryRule, FALLBACK_CATEGORY, ParserTables};
