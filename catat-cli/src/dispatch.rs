//! Chat-style message handling: one incoming message in, at most one reply out.

use anyhow::Result;
use catat_core::{Direction, time::local_now};
use catat_ledger::{
    CsvReportRenderer, JsonArchive, LedgerEngine, LedgerError, LedgerStore, NewTransaction,
    ReportPeriod,
};
use catat_parse::{MessageParser, ParseError, looks_like_transaction, parse_structured};
use chrono::NaiveDateTime;
use chrono_tz::Tz;
use tracing::debug;

use crate::format;

pub const HELP: &str = "\
Send a message like \"beli kopi 25k\" or \"terima gaji 5jt tgl 1\" to record it.

/masuk <amount> <category> <description>  record income
/keluar <amount> <category> <description> record an expense
/saldo                                    current balance
/laporan [hari|bulan]                     report (all time by default)
/kategori                                 list categories
/list                                     recent transactions
/hapus <id>                               delete a transaction
/tutup                                    archive everything and start a new period
/help                                     this message";

pub struct Bot<S> {
    engine: LedgerEngine<S>,
    parser: MessageParser,
    renderer: CsvReportRenderer,
    archive: JsonArchive,
    tz: Tz,
    list_limit: usize,
}

impl<S: LedgerStore> Bot<S> {
    pub fn new(
        engine: LedgerEngine<S>,
        parser: MessageParser,
        renderer: CsvReportRenderer,
        archive: JsonArchive,
        tz: Tz,
        list_limit: usize,
    ) -> Self {
        Self {
            engine,
            parser,
            renderer,
            archive,
            tz,
            list_limit,
        }
    }

    pub fn handle(&self, user: &str, text: &str) -> Result<Option<String>> {
        self.handle_at(user, text, local_now(self.tz))
    }

    /// `Ok(None)` means the message is not for us and gets no reply.
    pub fn handle_at(&self, user: &str, text: &str, now: NaiveDateTime) -> Result<Option<String>> {
        let text = text.trim();
        let Some(command) = text.strip_prefix('/') else {
            return self.free_text(user, text, now);
        };

        let (name, args) = match command.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (command, ""),
        };
        let name = name.to_lowercase();

        let reply = match name.as_str() {
            "help" | "start" => HELP.to_string(),
            "masuk" | "in" => self.structured(user, Direction::Income, args, now)?,
            "keluar" | "out" => self.structured(user, Direction::Expense, args, now)?,
            "saldo" => format::balance(&self.engine.calculate_balance(user)?),
            "laporan" => self.report(user, args, now)?,
            "kategori" => format::categories(&self.engine.categories(user)?),
            "list" | "daftar" => {
                format::transaction_list(&self.engine.list_transactions(user, self.list_limit)?)
            }
            "hapus" => self.delete(user, args)?,
            "tutup" => self.close(user, now)?,
            _ => format!("Unknown command /{name}. Send /help for the list."),
        };
        Ok(Some(reply))
    }

    fn free_text(&self, user: &str, text: &str, now: NaiveDateTime) -> Result<Option<String>> {
        if !looks_like_transaction(text) {
            return Ok(None);
        }
        let parsed = match self.parser.parse_message(text, now.date()) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!(user, error = %e, "message ignored");
                return Ok(None);
            }
        };
        match self.engine.add_transaction(user, parsed.into(), now) {
            Ok(t) => Ok(Some(format::recorded(&t))),
            Err(LedgerError::InvalidAmount(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn structured(
        &self,
        user: &str,
        direction: Direction,
        args: &str,
        now: NaiveDateTime,
    ) -> Result<String> {
        let command = match direction {
            Direction::Income => "/masuk",
            Direction::Expense => "/keluar",
        };
        let entry = match parse_structured(args) {
            Ok(entry) => entry,
            Err(ParseError::Usage(usage)) => return Ok(format!("Usage: {command} {usage}")),
            Err(e) => return Ok(format!("Could not read that: {e}")),
        };
        match self
            .engine
            .add_transaction(user, NewTransaction::structured(direction, entry), now)
        {
            Ok(t) => Ok(format::recorded(&t)),
            Err(e @ LedgerError::InvalidAmount(_)) => Ok(format!("Could not record: {e}")),
            Err(e) => Err(e.into()),
        }
    }

    fn report(&self, user: &str, args: &str, now: NaiveDateTime) -> Result<String> {
        let period: ReportPeriod = match args.parse() {
            Ok(period) => period,
            Err(e) => return Ok(e),
        };
        match self.engine.generate_report(user, period, now) {
            Ok(summary) => Ok(format::report(&summary)),
            Err(LedgerError::NoTransactions) => {
                Ok(format!("No transactions for: {}", period.label().to_lowercase()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn delete(&self, user: &str, args: &str) -> Result<String> {
        let Ok(id) = args.parse::<u64>() else {
            return Ok("Usage: /hapus <id> (see /list for ids)".to_string());
        };
        match self.engine.delete_transaction(user, id) {
            Ok(t) => Ok(format!("Deleted {}", format::transaction_line(&t))),
            Err(LedgerError::NotFound(id)) => Ok(format!("Transaction #{id} not found.")),
            Err(e) => Err(e.into()),
        }
    }

    fn close(&self, user: &str, now: NaiveDateTime) -> Result<String> {
        match self
            .engine
            .close_period(user, &self.renderer, &self.archive, now)
        {
            Ok(summary) => Ok(format::closed(&summary)),
            Err(LedgerError::NoTransactions) => Ok("Nothing to close yet.".to_string()),
            Err(e @ (LedgerError::Render(_) | LedgerError::Archive(_))) => {
                Ok(format!("Period close failed, nothing was removed: {e}"))
            }
            Err(e) => Err(e.into()),
        }
    }
}
