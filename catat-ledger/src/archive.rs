//! Collaborators used when a period is closed: a report renderer that turns the
//! closing transactions into a document, and an archival store that keeps a
//! snapshot of the ledger before it is reset.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use catat_core::{Balance, Transaction, UserLedger, expense_by_category, sort_newest_first};
use chrono::NaiveDateTime;
use csv::WriterBuilder;

pub trait ReportRenderer: Send + Sync {
    /// Render the closing transactions; returns a reference to the artifact.
    fn render(
        &self,
        user: &str,
        txns: &[Transaction],
        balance: &Balance,
        now: NaiveDateTime,
    ) -> Result<String>;
}

pub trait ArchivalStore: Send + Sync {
    /// Persist the pre-reset ledger; returns a reference to the snapshot.
    fn snapshot(&self, user: &str, ledger: &UserLedger, now: NaiveDateTime) -> Result<String>;
}

/// Keep only ASCII alphanumerics so a chat id like `62812@c.us` is a safe file stem.
pub fn sanitize_user(user: &str) -> String {
    user.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn stamp(now: NaiveDateTime) -> String {
    now.format("%Y-%m-%dT%H-%M-%S%.3f").to_string()
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))
}

/// Writes `laporan-<user>-<stamp>.csv`: summary, expenses per category, then
/// every transaction newest first.
#[derive(Debug, Clone)]
pub struct CsvReportRenderer {
    dir: PathBuf,
}

impl CsvReportRenderer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ReportRenderer for CsvReportRenderer {
    fn render(
        &self,
        user: &str,
        txns: &[Transaction],
        balance: &Balance,
        now: NaiveDateTime,
    ) -> Result<String> {
        ensure_dir(&self.dir)?;
        let path = self
            .dir
            .join(format!("laporan-{}-{}.csv", sanitize_user(user), stamp(now)));

        let mut wrt = WriterBuilder::new()
            .flexible(true)
            .from_path(&path)
            .with_context(|| format!("create {}", path.display()))?;

        let generated = now.format("%Y-%m-%d %H:%M").to_string();
        wrt.write_record(["summary", "generated_at", generated.as_str()])?;
        for (label, value) in [
            ("income", balance.income),
            ("expense", balance.expense),
            ("balance", balance.balance),
        ] {
            wrt.write_record(["summary", label, value.to_string().as_str()])?;
        }

        for c in expense_by_category(txns) {
            wrt.write_record([
                "category".to_string(),
                c.category,
                c.total.to_string(),
                c.share_pct.to_string(),
            ])?;
        }

        wrt.write_record(["id", "date", "type", "category", "description", "amount"])?;
        let mut sorted = txns.to_vec();
        sort_newest_first(&mut sorted);
        for t in &sorted {
            let kind = if t.is_income() { "income" } else { "expense" };
            wrt.write_record([
                t.id.to_string(),
                t.occurred_at.format("%Y-%m-%d %H:%M").to_string(),
                kind.to_string(),
                t.category.clone(),
                t.description.clone(),
                t.amount.to_string(),
            ])?;
        }
        wrt.flush()?;

        Ok(path.display().to_string())
    }
}

/// Writes `backup-<user>-<stamp>.json` with the full ledger.
#[derive(Debug, Clone)]
pub struct JsonArchive {
    dir: PathBuf,
}

impl JsonArchive {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ArchivalStore for JsonArchive {
    fn snapshot(&self, user: &str, ledger: &UserLedger, now: NaiveDateTime) -> Result<String> {
        ensure_dir(&self.dir)?;
        let path = self
            .dir
            .join(format!("backup-{}-{}.json", sanitize_user(user), stamp(now)));
        let json = serde_json::to_string_pretty(ledger).context("serialize ledger snapshot")?;
        fs::write(&path, json).with_context(|| format!("write {}", path.display()))?;
        Ok(path.display().to_string())
    }
}
