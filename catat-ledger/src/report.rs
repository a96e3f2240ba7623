//! Period reports and the period-close summary.

use std::fmt;
use std::str::FromStr;

use catat_core::{
    Balance, CategoryTotal, Transaction, expense_by_category, sort_newest_first,
    time::{same_day, same_month},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Number of recent transactions a report shows by default
pub const DEFAULT_RECENT: usize = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ReportPeriod {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "month")]
    ThisMonth,
}

impl ReportPeriod {
    /// Whether a transaction at `at` falls in this period relative to `now`.
    pub fn contains(&self, at: NaiveDateTime, now: NaiveDateTime) -> bool {
        match self {
            ReportPeriod::All => true,
            ReportPeriod::Today => same_day(at, now),
            ReportPeriod::ThisMonth => same_month(at, now),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportPeriod::All => "All time",
            ReportPeriod::Today => "Today",
            ReportPeriod::ThisMonth => "This month",
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReportPeriod {
    type Err = String;

    /// Accepts the chat words (`semua`, `hari`, `bulan`) and English ones.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" | "semua" => Ok(ReportPeriod::All),
            "today" | "day" | "hari" => Ok(ReportPeriod::Today),
            "month" | "this-month" | "bulan" => Ok(ReportPeriod::ThisMonth),
            other => Err(format!("unknown report period '{other}' (all, today, month)")),
        }
    }
}

/// Aggregate view of one period
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReportSummary {
    pub period: ReportPeriod,
    pub generated_at: NaiveDateTime,
    /// Over the filtered transactions only
    pub balance: Balance,
    pub transaction_count: usize,
    /// Newest first
    pub recent: Vec<Transaction>,
    pub expense_by_category: Vec<CategoryTotal>,
}

impl ReportSummary {
    /// Build from already-filtered transactions. `None` when there are none.
    pub fn build(
        period: ReportPeriod,
        mut txns: Vec<Transaction>,
        now: NaiveDateTime,
        recent: usize,
    ) -> Option<Self> {
        if txns.is_empty() {
            return None;
        }
        sort_newest_first(&mut txns);
        let balance = Balance::of(&txns);
        let expense_by_category = expense_by_category(&txns);
        let transaction_count = txns.len();
        txns.truncate(recent);

        Some(Self {
            period,
            generated_at: now,
            balance,
            transaction_count,
            recent: txns,
            expense_by_category,
        })
    }
}

/// What a successful period close hands back
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClosedPeriodSummary {
    /// Balance of the ledger just before it was cleared
    pub balance: Balance,
    pub closed_count: usize,
    pub expense_by_category: Vec<CategoryTotal>,
    /// Reference returned by the report renderer
    pub report: String,
    /// Reference returned by the archival store
    pub snapshot: String,
    pub closed_at: NaiveDateTime,
}
