use thiserror::Error;

/// Why a piece of text could not become a transaction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing that looks like a numeral. Callers treat the message as chatter.
    #[error("no amount found")]
    NoAmountFound,
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}
