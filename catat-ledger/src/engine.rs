//! Per-user ledger engine.
//!
//! A user is either absent (never written) or has a ledger of transactions
//! plus a category set seeded from the defaults on first write. Mutations
//! take the user's lock and then the store's exclusive section for the whole
//! load-modify-save sequence; reads go straight to the store, which hands
//! back whole snapshots.

use catat_core::{
    Balance, Direction, FALLBACK_CATEGORY, Transaction, UserLedger, expense_by_category,
};
use catat_parse::{ParsedTransaction, StructuredEntry};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::archive::{ArchivalStore, ReportRenderer};
use crate::error::LedgerError;
use crate::locks::{UserLocks, acquire};
use crate::report::{ClosedPeriodSummary, DEFAULT_RECENT, ReportPeriod, ReportSummary};
use crate::store::LedgerStore;

/// Input to [`LedgerEngine::add_transaction`]
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub direction: Direction,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    /// Overrides "now" as the transaction time (midnight of that day)
    pub occurred_on: Option<NaiveDate>,
}

impl From<ParsedTransaction> for NewTransaction {
    fn from(p: ParsedTransaction) -> Self {
        Self {
            direction: p.direction,
            amount: p.amount,
            category: p.category,
            description: p.description,
            occurred_on: p.explicit_date,
        }
    }
}

impl NewTransaction {
    pub fn structured(direction: Direction, entry: StructuredEntry) -> Self {
        Self {
            direction,
            amount: entry.amount,
            category: entry.category,
            description: entry.description,
            occurred_on: None,
        }
    }
}

pub struct LedgerEngine<S> {
    store: S,
    locks: UserLocks,
    default_categories: Vec<String>,
    recent: usize,
}

impl<S: LedgerStore> LedgerEngine<S> {
    pub fn new(store: S, default_categories: Vec<String>) -> Self {
        let default_categories = if default_categories.is_empty() {
            vec![FALLBACK_CATEGORY.to_string()]
        } else {
            default_categories
        };
        Self {
            store,
            locks: UserLocks::new(),
            default_categories,
            recent: DEFAULT_RECENT,
        }
    }

    /// How many recent transactions a report carries.
    pub fn with_report_recent(mut self, recent: usize) -> Self {
        self.recent = recent;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn fallback_category(&self) -> &str {
        self.default_categories
            .last()
            .map(String::as_str)
            .unwrap_or(FALLBACK_CATEGORY)
    }

    /// Append a transaction, creating the user's ledger on first use.
    pub fn add_transaction(
        &self,
        user: &str,
        entry: NewTransaction,
        now: NaiveDateTime,
    ) -> Result<Transaction, LedgerError> {
        if entry.amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(entry.amount));
        }

        let category = match entry.category.trim() {
            "" => self.fallback_category().to_string(),
            c => c.to_string(),
        };
        let description = match entry.description.trim() {
            "" => entry.direction.default_label().to_string(),
            d => d.to_string(),
        };

        let handle = self.locks.handle(user);
        let _guard = acquire(&handle);

        self.store.exclusive(|| -> Result<_, LedgerError> {
            let mut ledger = match self.store.load(user)? {
                Some(ledger) => ledger,
                None => UserLedger::seeded(&self.default_categories),
            };

            let txn = Transaction {
                id: ledger.next_id(),
                direction: entry.direction,
                amount: entry.amount,
                category,
                description,
                occurred_at: entry
                    .occurred_on
                    .map(|d| d.and_time(NaiveTime::MIN))
                    .unwrap_or(now),
            };
            ledger.transactions.push(txn.clone());
            self.store.save(user, &ledger)?;

            info!(user, id = txn.id, direction = ?txn.direction, amount = %txn.amount, category = %txn.category, "transaction added");
            Ok(txn)
        })
    }

    /// Remove the transaction with `id` and hand it back.
    pub fn delete_transaction(&self, user: &str, id: u64) -> Result<Transaction, LedgerError> {
        let handle = self.locks.handle(user);
        let _guard = acquire(&handle);

        self.store.exclusive(|| -> Result<_, LedgerError> {
            let mut ledger = self.store.load(user)?.ok_or(LedgerError::NotFound(id))?;
            let index = ledger
                .transactions
                .iter()
                .position(|t| t.id == id)
                .ok_or(LedgerError::NotFound(id))?;
            let removed = ledger.transactions.remove(index);
            self.store.save(user, &ledger)?;

            info!(user, id, "transaction deleted");
            Ok(removed)
        })
    }

    /// Income, expense and their difference; all zero for an absent user.
    pub fn calculate_balance(&self, user: &str) -> Result<Balance, LedgerError> {
        Ok(self
            .store
            .load(user)?
            .map(|l| l.balance())
            .unwrap_or_default())
    }

    /// Newest first, at most `limit`.
    pub fn list_transactions(&self, user: &str, limit: usize) -> Result<Vec<Transaction>, LedgerError> {
        let Some(ledger) = self.store.load(user)? else {
            return Ok(Vec::new());
        };
        let mut txns = ledger.newest_first();
        txns.truncate(limit);
        Ok(txns)
    }

    /// The user's categories, or the defaults they would be seeded with.
    pub fn categories(&self, user: &str) -> Result<Vec<String>, LedgerError> {
        Ok(match self.store.load(user)? {
            Some(ledger) => ledger.categories,
            None => UserLedger::seeded(&self.default_categories).categories,
        })
    }

    /// Summary of the transactions that fall in `period` relative to `now`.
    pub fn generate_report(
        &self,
        user: &str,
        period: ReportPeriod,
        now: NaiveDateTime,
    ) -> Result<ReportSummary, LedgerError> {
        let ledger = self.store.load(user)?.ok_or(LedgerError::NoTransactions)?;
        let filtered: Vec<Transaction> = ledger
            .transactions
            .into_iter()
            .filter(|t| period.contains(t.occurred_at, now))
            .collect();
        ReportSummary::build(period, filtered, now, self.recent).ok_or(LedgerError::NoTransactions)
    }

    /// Render and archive the current transactions, then clear them.
    ///
    /// Categories survive the reset. If either collaborator fails the ledger
    /// is left exactly as it was.
    pub fn close_period(
        &self,
        user: &str,
        renderer: &dyn ReportRenderer,
        archive: &dyn ArchivalStore,
        now: NaiveDateTime,
    ) -> Result<ClosedPeriodSummary, LedgerError> {
        let handle = self.locks.handle(user);
        let _guard = acquire(&handle);

        self.store.exclusive(|| -> Result<_, LedgerError> {
            let mut ledger = self.store.load(user)?.ok_or(LedgerError::NoTransactions)?;
            if ledger.transactions.is_empty() {
                return Err(LedgerError::NoTransactions);
            }

            let balance = ledger.balance();
            let report = renderer
                .render(user, &ledger.transactions, &balance, now)
                .map_err(|e| {
                    let reason = format!("{e:#}");
                    warn!(user, error = %reason, "period close aborted: report");
                    LedgerError::Render(reason)
                })?;
            let snapshot = archive.snapshot(user, &ledger, now).map_err(|e| {
                let reason = format!("{e:#}");
                warn!(user, error = %reason, "period close aborted: snapshot");
                LedgerError::Archive(reason)
            })?;

            let closed_count = ledger.transactions.len();
            let expense_by_category = expense_by_category(&ledger.transactions);
            ledger.transactions.clear();
            self.store.save(user, &ledger)?;

            info!(user, closed_count, report = %report, snapshot = %snapshot, "period closed");
            Ok(ClosedPeriodSummary {
                balance,
                closed_count,
                expense_by_category,
                report,
                snapshot,
                closed_at: now,
            })
        })
    }
}
