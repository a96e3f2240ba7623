//! Ledger record types: transactions, per-user ledgers and balances

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a transaction increases or decreases the balance
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expense")]
    Expense,
}

impl Direction {
    /// Label used when a message carries no description of its own
    pub fn default_label(&self) -> &'static str {
        match self {
            Direction::Income => "Income",
            Direction::Expense => "Expense",
        }
    }
}

/// A single ledger entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Unique within the owning ledger
    pub id: u64,
    #[serde(rename = "type")]
    pub direction: Direction,
    /// Always strictly positive; the sign lives in `direction`
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    /// Local wall-clock time in the configured timezone
    #[serde(rename = "date")]
    pub occurred_at: NaiveDateTime,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.direction == Direction::Income
    }

    pub fn is_expense(&self) -> bool {
        self.direction == Direction::Expense
    }

    /// Amount with the direction applied (expenses negative)
    pub fn signed_amount(&self) -> Decimal {
        match self.direction {
            Direction::Income => self.amount,
            Direction::Expense => -self.amount,
        }
    }
}

/// Everything persisted for one user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UserLedger {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl UserLedger {
    /// Fresh ledger seeded with the default category set.
    pub fn seeded(default_categories: &[String]) -> Self {
        let mut categories: Vec<String> = Vec::with_capacity(default_categories.len());
        for c in default_categories {
            if !categories.contains(c) {
                categories.push(c.clone());
            }
        }
        Self {
            transactions: Vec::new(),
            categories,
        }
    }

    /// `max(existing ids, 0) + 1`
    pub fn next_id(&self) -> u64 {
        self.transactions.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    pub fn balance(&self) -> Balance {
        Balance::of(&self.transactions)
    }

    /// Transactions newest first. Ties on time fall back to the higher id first.
    pub fn newest_first(&self) -> Vec<Transaction> {
        let mut txns = self.transactions.clone();
        sort_newest_first(&mut txns);
        txns
    }
}

/// Sort in place by `occurred_at` descending, then id descending.
pub fn sort_newest_first(txns: &mut [Transaction]) {
    txns.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at).then(b.id.cmp(&a.id)));
}

/// Aggregate over a set of transactions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Balance {
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub expense: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

impl Balance {
    pub fn of<'a>(txns: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let mut income = Decimal::ZERO;
        let mut expense = Decimal::ZERO;
        for t in txns {
            match t.direction {
                Direction::Income => income += t.amount,
                Direction::Expense => expense += t.amount,
            }
        }
        Self {
            income,
            expense,
            balance: income - expense,
        }
    }
}

/// Expense total for one category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    /// Share of all expenses, 0-100, one decimal place
    #[serde(with = "rust_decimal::serde::float")]
    pub share_pct: Decimal,
}

/// Expenses grouped by category, largest first.
pub fn expense_by_category(txns: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<(String, Decimal)> = Vec::new();
    for t in txns.iter().filter(|t| t.is_expense()) {
        match totals.iter_mut().find(|(c, _)| *c == t.category) {
            Some((_, sum)) => *sum += t.amount,
            None => totals.push((t.category.clone(), t.amount)),
        }
    }

    let grand: Decimal = totals.iter().map(|(_, s)| *s).sum();
    totals.sort_by(|a, b| b.1.cmp(&a.1));

    totals
        .into_iter()
        .map(|(category, total)| {
            let share_pct = if grand.is_zero() {
                Decimal::ZERO
            } else {
                (total * Decimal::ONE_HUNDRED / grand).round_dp(1)
            };
            CategoryTotal {
                category,
                total,
                share_pct,
            }
        })
        .collect()
}
