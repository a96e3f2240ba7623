//! catat-ledger: per-user ledgers, reports and period closing

pub mod archive;
pub mod engine;
pub mod error;
pub mod locks;
pub mod report;
pub mod store;

pub use archive::{ArchivalStore, CsvReportRenderer, JsonArchive, ReportRenderer, sanitize_user};
pub use engine::{LedgerEngine, NewTransaction};
pub use error::{LedgerError, StoreError};
pub use locks::UserLocks;
pub use report::{ClosedPeriodSummary, ReportPeriod, ReportSummary};
pub use store::{JsonFileStore, LedgerStore, MemoryStore};
