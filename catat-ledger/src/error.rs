//! Errors the ledger engine and its stores can return.
//!
//! None of them are fatal: every variant is a per-call failure the caller
//! reports back to the user.

use rust_decimal::Decimal;
use thiserror::Error;

/// Persistence failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("ledger store I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("ledger store encoding: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("amount must be greater than zero, got {0}")]
    InvalidAmount(Decimal),
    #[error("transaction {0} not found")]
    NotFound(u64),
    #[error("no transactions")]
    NoTransactions,
    #[error("report rendering failed: {0}")]
    Render(String),
    #[error("archiving failed: {0}")]
    Archive(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
