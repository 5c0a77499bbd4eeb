use liquidfolio::{AppConfig, Appended, JsonStore, Ledger, Pool, TransactionType,
    transaction::{Amount, Timestamp}};

use std::path::PathBuf;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use colored::Colorize;
use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[clap(version, about, propagate_version = true)]
struct Cli {
   /// Directory holding pools.json and transactions.json
   #[clap(short, long, value_parser, default_value = ".")]
   dir: PathBuf,

   /// TOML config locating the collection files (overrides --dir)
   #[clap(short, long, value_parser)]
   config: Option<PathBuf>,

   /// Action to perform
   #[clap(subcommand)]
   action: Subcommands,
}

#[derive(Debug, Subcommand)]
enum Subcommands {
    /// Summary and active pools
    Dashboard,
    /// Closed pools
    History,
    /// One pool in detail: metrics, fee curve, recent transactions
    Show(Show),
    /// Open a new pool with its initial investment
    Create(Create),
    /// Add liquidity to a pool
    Deposit(AddTransaction),
    /// Record collected fees
    Fee(AddTransaction),
    /// Record a withdrawal
    Withdraw(AddTransaction),
    /// Close a pool (one-way)
    Close(Close),
    /// Rebuild cached pool metrics from the transaction history
    Audit
}

fn parse_timestamp(date: &Option<String>) -> Timestamp {
    let raw = match date {
        None => return Utc::now().timestamp_millis(),
        Some(raw) => raw
    };
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.timestamp_millis())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M")
            .map(|parsed| parsed.and_utc().timestamp_millis()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(|parsed| parsed.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp_millis()))
        .expect(&format!("Unrecognised date {}, want RFC-3339, Y-m-d H:M or Y-m-d", raw))
}

fn format_timestamp(timestamp: Timestamp) -> String {
    match Utc.timestamp_millis_opt(timestamp).single() {
        Some(parsed) => parsed.format("%Y-%m-%d %H:%M").to_string(),
        None => timestamp.to_string()
    }
}

/// Accepts a pool id or a pair name (matched upper-cased, newest wins).
fn resolve_pool(ledger: &Ledger<JsonStore>, reference: &str) -> Pool {
    let pools = ledger.pools();
    if let Ok(id) = Uuid::parse_str(reference) {
        if let Some(pool) = pools.iter().find(|pool| pool.id == id) {
            return pool.clone();
        }
    }
    let pair = reference.to_uppercase();
    pools.into_iter()
        .find(|pool| pool.pair_name == pair)
        .expect(&format!("No such pool {}", reference))
}

fn print_pools(pools: &[Pool], now: Timestamp) {
    for pool in pools {
        let color = if pool.current_roi > 0.0 {
            colored::ColoredString::green
        } else if pool.current_roi < 0.0 {
            colored::ColoredString::bright_red
        } else {
            colored::ColoredString::normal
        };
        let fmt_roi = color(format!("{:+.2}%", pool.current_roi).white());
        println!("{} [{}] invested: {:.2}  fees: {:.2}  roi: {}  {} days  id: {}",
            pool.pair_name.bold(), pool.status, pool.total_invested, pool.total_fees,
            fmt_roi, pool.duration_days(now), pool.id);
    }
}

#[derive(Args, Debug)]
struct Show {
    /// Pool id or pair name
    #[clap(value_parser)]
    pool: String
}

impl Show {
    fn show(&self, ledger: &Ledger<JsonStore>) {
        let pool = resolve_pool(ledger, &self.pool);
        let now = Utc::now().timestamp_millis();

        println!("{} [{}]", pool.pair_name.bold(), pool.status);
        println!("Invested: {:.2}", pool.total_invested);
        println!("Collected Fees: {:.2}", pool.total_fees);
        println!("Net Profit: {:.2}", pool.total_fees);
        println!("ROI: {:+.2}%", pool.current_roi);
        println!("Duration: {} days", pool.duration_days(now));
        if let Some(closed_at) = pool.closed_at {
            println!("Closed: {}", format_timestamp(closed_at));
        }

        let series = ledger.fee_history(pool.id);
        if !series.is_empty() {
            println!("\n{}", "Fee History".bold());
            for point in &series {
                println!("{}  +{:.2}  total {:.2}",
                    format_timestamp(point.timestamp), point.amount, point.cumulative);
            }
        }

        println!("\n{}", "Transactions".bold());
        for transaction in ledger.transactions(Some(pool.id)) {
            println!("{}  {}", format_timestamp(transaction.timestamp), transaction);
        }
    }
}

#[derive(Args, Debug)]
struct Create {
    /// Asset pair, e.g. ETH/USDC
    #[clap(value_parser)]
    pair: String,

    /// Initial investment amount
    #[clap(value_parser)]
    amount: Amount,

    /// Backdate the position (RFC-3339, "Y-m-d H:M" or "Y-m-d"); defaults to now
    #[clap(short='t', long, value_parser)]
    date: Option<String>
}

impl Create {
    fn create(&self, ledger: &Ledger<JsonStore>) {
        if self.amount <= 0.0 {
            panic!("Initial investment must be positive, got {}", self.amount);
        }
        // pair names are stored upper-case; the ledger takes them as given
        let pair = self.pair.to_uppercase();
        let result = ledger.create_pool(&pair, self.amount, parse_timestamp(&self.date));

        match result {
            Err(err) => panic!("Ledger error: {:?}", &err),
            Ok(pool) => println!("Created {} ({})", pool.pair_name.bold(), pool.id)
        }
    }
}

#[derive(Args, Debug)]
struct AddTransaction {
    /// Pool id or pair name
    #[clap(value_parser)]
    pool: String,

    #[clap(value_parser)]
    amount: Amount,

    /// Backdate the record; defaults to now
    #[clap(short='t', long, value_parser)]
    date: Option<String>,

    #[clap(short, long, value_parser)]
    notes: Option<String>
}

impl AddTransaction {
    fn add(&self, ledger: &Ledger<JsonStore>, kind: TransactionType) {
        if self.amount < 0.0 {
            panic!("Amount must not be negative, got {}", self.amount);
        }
        let pool = resolve_pool(ledger, &self.pool);
        let result = ledger.add_transaction(
            pool.id, kind, self.amount, parse_timestamp(&self.date), self.notes.clone());

        match result {
            Err(err) => panic!("Ledger error: {:?}", &err),
            Ok(Appended::Applied(updated)) =>
                println!("{} {} on {}, roi now {:+.2}%", kind, self.amount, updated.pair_name, updated.current_roi),
            Ok(Appended::Orphaned) =>
                println!("{}", "Recorded, but no pool matched; run audit after fixing the data".yellow())
        }
    }
}

#[derive(Args, Debug)]
struct Close {
    /// Pool id or pair name
    #[clap(value_parser)]
    pool: String,

    /// Skip the confirmation
    #[clap(short, long, action)]
    yes: bool
}

impl Close {
    fn close(&self, ledger: &Ledger<JsonStore>) {
        let pool = resolve_pool(ledger, &self.pool);
        if !self.yes {
            println!("Are you sure you want to close {}? This action cannot be undone.", pool.pair_name.bold());
            println!("Re-run with --yes to confirm.");
            return;
        }

        let result = ledger.close_pool(pool.id, Utc::now().timestamp_millis());
        match result {
            Err(err) => panic!("Ledger error: {:?}", &err),
            Ok(closed) => println!("Closed {} at {}", closed.pair_name.bold(),
                format_timestamp(closed.closed_at.unwrap_or_default()))
        }
    }
}

fn dashboard(ledger: &Ledger<JsonStore>) {
    let summary = ledger.summary();
    println!("{}", "Dashboard".bold());
    println!("Total Value Locked: {:.2}", summary.total_invested);
    println!("Total Earnings: {:.2} ({:+.2}%)", summary.total_earnings, summary.average_roi);
    println!("Active Pools: {}\n", summary.active_pools);

    let now = Utc::now().timestamp_millis();
    let active: Vec<Pool> = ledger.pools().into_iter().filter(|pool| pool.is_active()).collect();
    if active.is_empty() {
        println!("No active pools found.");
    } else {
        print_pools(&active, now);
    }
}

fn history(ledger: &Ledger<JsonStore>) {
    let now = Utc::now().timestamp_millis();
    let closed: Vec<Pool> = ledger.pools().into_iter().filter(|pool| !pool.is_active()).collect();
    if closed.is_empty() {
        println!("No closed pools found.");
    } else {
        print_pools(&closed, now);
    }
}

fn main() {
    let args = Cli::parse();

    let config = match &args.config {
        Some(path) => AppConfig::read(path).expect("failed to read app configuration"),
        None => AppConfig::with_dir(&args.dir)
    };
    let ledger = Ledger::new(config.open_store());

    match args.action {
        Subcommands::Dashboard => dashboard(&ledger),
        Subcommands::History => history(&ledger),
        Subcommands::Show(show) => show.show(&ledger),
        Subcommands::Create(create) => create.create(&ledger),
        Subcommands::Deposit(add) => add.add(&ledger, TransactionType::Deposit),
        Subcommands::Fee(add) => add.add(&ledger, TransactionType::Fee),
        Subcommands::Withdraw(add) => add.add(&ledger, TransactionType::Withdraw),
        Subcommands::Close(close) => close.close(&ledger),
        Subcommands::Audit => {
            let pools = ledger.rebuild_metrics().expect("failed to rebuild metrics");
            println!("Rebuilt metrics for {} pools", pools.len());
            print_pools(&pools, Utc::now().timestamp_millis());
        }
    }
}
