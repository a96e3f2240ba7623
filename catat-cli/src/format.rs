//! Plain-text renderings of ledger results, shared by the subcommands and
//! the chat dispatcher.

use catat_core::{Balance, CategoryTotal, Transaction, format_rupiah};
use catat_ledger::{ClosedPeriodSummary, ReportSummary};
use std::fmt::Write;

pub fn transaction_line(t: &Transaction) -> String {
    let sign = if t.is_income() { "+" } else { "-" };
    format!(
        "#{} {} {} {} | {} | {}",
        t.id,
        t.occurred_at.format("%Y-%m-%d %H:%M"),
        sign,
        format_rupiah(t.amount),
        t.category,
        t.description
    )
}

pub fn recorded(t: &Transaction) -> String {
    let kind = if t.is_income() { "Income" } else { "Expense" };
    format!(
        "Recorded {kind} #{}: {} | {} | {} ({})",
        t.id,
        format_rupiah(t.amount),
        t.category,
        t.description,
        t.occurred_at.format("%Y-%m-%d")
    )
}

pub fn balance(b: &Balance) -> String {
    format!(
        "Income:  {}\nExpense: {}\nBalance: {}",
        format_rupiah(b.income),
        format_rupiah(b.expense),
        format_rupiah(b.balance)
    )
}

pub fn transaction_list(txns: &[Transaction]) -> String {
    if txns.is_empty() {
        return "No transactions yet.".to_string();
    }
    let mut out = format!("Last {} transactions:", txns.len());
    for t in txns {
        let _ = write!(out, "\n{}", transaction_line(t));
    }
    out
}

fn categories_block(out: &mut String, totals: &[CategoryTotal]) {
    if totals.is_empty() {
        return;
    }
    out.push_str("\n\nExpenses by category:");
    for c in totals {
        let _ = write!(
            out,
            "\n- {}: {} ({}%)",
            c.category,
            format_rupiah(c.total),
            c.share_pct
        );
    }
}

pub fn report(r: &ReportSummary) -> String {
    let mut out = format!(
        "Report: {} (generated {})\nTransactions: {}\n{}",
        r.period,
        r.generated_at.format("%Y-%m-%d %H:%M"),
        r.transaction_count,
        balance(&r.balance)
    );
    categories_block(&mut out, &r.expense_by_category);
    out.push_str("\n\nRecent:");
    for t in &r.recent {
        let _ = write!(out, "\n{}", transaction_line(t));
    }
    out
}

pub fn closed(c: &ClosedPeriodSummary) -> String {
    let mut out = format!(
        "Period closed at {}: {} transactions archived.\n{}",
        c.closed_at.format("%Y-%m-%d %H:%M"),
        c.closed_count,
        balance(&c.balance)
    );
    categories_block(&mut out, &c.expense_by_category);
    let _ = write!(out, "\n\nReport: {}\nBackup: {}", c.report, c.snapshot);
    out
}

pub fn categories(names: &[String]) -> String {
    let mut out = "Categories:".to_string();
    for n in names {
        let _ = write!(out, "\n- {n}");
    }
    out
}
