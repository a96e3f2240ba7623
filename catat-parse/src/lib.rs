//! catat-parse: turns chat text into structured transactions.
//!
//! Layers, leaves first: [`amount`] normalizes numerals, [`classify`] decides
//! direction and category from keyword tables, [`extract`] orchestrates both
//! over free text. [`command`] handles the explicit `<amount> <category> <desc>`
//! form.

pub mod amount;
pub mod classify;
pub mod command;
pub mod error;
pub mod extract;

pub use amount::normalize;
pub use classify::{classify_category, classify_direction, is_inflow};
pub use command::{StructuredEntry, parse_structured};
pub use error::ParseError;
pub use extract::{MessageParser, ParsedTransaction, looks_like_transaction};
