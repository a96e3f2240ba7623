use anyhow::{Context, Result, bail};
use catat_core::{
    Direction,
    time::{local_now, parse_timezone},
};
use catat_ledger::{
    CsvReportRenderer, JsonArchive, JsonFileStore, LedgerEngine, NewTransaction, ReportPeriod,
};
use catat_parse::{MessageParser, parse_structured};
use clap::{Parser, Subcommand};
use tracing::debug;

mod config;
mod dispatch;
mod format;
mod state;

use dispatch::Bot;

#[derive(Parser, Debug)]
#[command(name = "catat", version, about = "Chat-style personal finance ledger")]
struct Cli {
    /// Ledger owner (a chat id or any name)
    #[arg(long, global = true, default_value = "local")]
    user: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write ~/.catat/config.toml with the defaults
    Init,

    /// Handle one chat message and print the reply
    Message { text: Vec<String> },

    /// Parse a message without recording it (JSON output)
    Parse { text: Vec<String> },

    /// Record a free-text transaction, e.g. `catat add beli kopi 25k`
    Add { text: Vec<String> },

    /// Record income: <amount> <category> <description>
    Income { args: Vec<String> },

    /// Record an expense: <amount> <category> <description>
    Expense { args: Vec<String> },

    /// Show income, expense and balance
    Balance,

    /// Show recent transactions
    List {
        /// Defaults to app.list_limit from config
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Delete a transaction by id
    Delete { id: u64 },

    /// Report for a period: all, today (hari) or month (bulan)
    Report {
        #[arg(default_value = "all")]
        period: ReportPeriod,
    },

    /// Archive all transactions and start a new period
    Close,

    /// List categories
    Categories,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Command::Init = cli.command {
        return config::init_config();
    }

    let cfg = config::load_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "catat={level},catat_ledger={level},catat_parse={level},catat_core={level}",
            level = cfg.app.log_level
        ))
        .with_writer(std::io::stderr)
        .init();

    let tz = parse_timezone(&cfg.app.timezone)?;
    let home = state::ensure_catat_home()?;
    let data_file = state::resolve(&home, &cfg.storage.data_file);
    let archive_dir = state::resolve(&home, &cfg.storage.archive_dir);
    debug!(data_file = %data_file.display(), archive_dir = %archive_dir.display(), "storage");

    let parser = MessageParser::new(cfg.parser.clone()).context("compile parser tables")?;
    let engine = LedgerEngine::new(
        JsonFileStore::new(data_file),
        cfg.parser.default_categories.clone(),
    )
    .with_report_recent(cfg.app.report_recent);
    let user = cli.user.as_str();
    let now = local_now(tz);

    match cli.command {
        Command::Init => {}

        Command::Message { text } => {
            let bot = Bot::new(
                engine,
                parser,
                CsvReportRenderer::new(&archive_dir),
                JsonArchive::new(&archive_dir),
                tz,
                cfg.app.list_limit,
            );
            if let Some(reply) = bot.handle(user, &text.join(" "))? {
                println!("{reply}");
            }
        }

        Command::Parse { text } => {
            let parsed = parser.parse_message(&text.join(" "), now.date())?;
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }

        Command::Add { text } => {
            let parsed = parser.parse_message(&text.join(" "), now.date())?;
            let t = engine.add_transaction(user, parsed.into(), now)?;
            println!("{}", format::recorded(&t));
        }

        Command::Income { args } => {
            record_structured(&engine, user, Direction::Income, &args, now)?;
        }

        Command::Expense { args } => {
            record_structured(&engine, user, Direction::Expense, &args, now)?;
        }

        Command::Balance => {
            println!("{}", format::balance(&engine.calculate_balance(user)?));
        }

        Command::List { limit } => {
            let txns = engine.list_transactions(user, limit.unwrap_or(cfg.app.list_limit))?;
            println!("{}", format::transaction_list(&txns));
        }

        Command::Delete { id } => {
            let t = engine.delete_transaction(user, id)?;
            println!("Deleted {}", format::transaction_line(&t));
        }

        Command::Report { period } => {
            let summary = engine.generate_report(user, period, now)?;
            println!("{}", format::report(&summary));
        }

        Command::Close => {
            let summary = engine.close_period(
                user,
                &CsvReportRenderer::new(&archive_dir),
                &JsonArchive::new(&archive_dir),
                now,
            )?;
            println!("{}", format::closed(&summary));
        }

        Command::Categories => {
            println!("{}", format::categories(&engine.categories(user)?));
        }
    }

    Ok(())
}

fn record_structured(
    engine: &LedgerEngine<JsonFileStore>,
    user: &str,
    direction: Direction,
    args: &[String],
    now: chrono::NaiveDateTime,
) -> Result<()> {
    if args.is_empty() {
        bail!("expected <amount> <category> <description>");
    }
    let entry = parse_structured(&args.join(" "))?;
    let t = engine.add_transaction(user, NewTransaction::structured(direction, entry), now)?;
    println!("{}", format::recorded(&t));
    Ok(())
}
