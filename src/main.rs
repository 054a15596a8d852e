use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use finance_tracker::cli::{
    handle_add, handle_backups, handle_export, handle_import, handle_list, handle_loan,
    handle_monthly, handle_restore, handle_summary, ExportFormat, KindArg, LoanArgs,
};
use finance_tracker::config::{paths::DATA_DIR_ENV, Settings, TrackerPaths};
use finance_tracker::log::init_logging;
use finance_tracker::services::LedgerService;
use finance_tracker::storage::LedgerStore;

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Personal income and expense ledger",
    long_about = "fintrack records income and expense transactions in a local JSON \
                  ledger and reports totals, spending by category, monthly cash \
                  flow and an estimate of affordable loan size."
)]
struct Cli {
    /// Ledger file to use instead of the configured one
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record an income or expense
    Add {
        /// Transaction type
        #[arg(value_enum)]
        kind: KindArg,
        /// Positive amount, e.g. 1500 or 1,500.50
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category label
        #[arg(short, long)]
        category: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Show recent transactions
    #[command(alias = "ls")]
    List {
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show totals, savings rate and expense by category
    Summary,

    /// Estimate loan eligibility from average monthly cash flow
    Loan(LoanArgs),

    /// Show net cash flow per month
    Monthly {
        /// First month to show (YYYY-MM)
        #[arg(long)]
        from: Option<String>,
    },

    /// Export the ledger
    Export {
        /// Export format
        #[arg(value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Output file (defaults to finance_YYYYMMDD.<ext>)
        output: Option<PathBuf>,
        /// Write JSON on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Import transactions from a CSV file
    Import {
        /// Path to CSV file with Date,Type,Category,Amount (₹) columns
        file: PathBuf,
    },

    /// List ledger backups
    Backups,

    /// Restore the ledger from a backup
    Restore {
        /// Backup file name or path ('latest' for the most recent)
        backup: String,
    },

    /// Show current configuration and paths
    Config {
        /// Write the current settings to the settings file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = run(cli);
    if let Err(e) = &result {
        tracing::error!(error = %e, "Command failed");
    }
    result
}

fn run(cli: Cli) -> Result<()> {
    let paths = TrackerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let ledger_path = cli
        .file
        .clone()
        .unwrap_or_else(|| paths.ledger_file(&settings.ledger_file));

    let Some(command) = cli.command else {
        println!("fintrack - personal income and expense ledger");
        println!();
        println!("Run 'fintrack --help' for usage information.");
        return Ok(());
    };

    if let Commands::Config { init } = command {
        if init {
            settings.save(&paths)?;
            println!("Settings written to: {}", paths.settings_file().display());
            println!();
        }
        println!("Finance Tracker Configuration");
        println!("=============================");
        println!("Base directory:  {}", paths.base_dir().display());
        println!("Settings file:   {}", paths.settings_file().display());
        println!("Ledger file:     {}", ledger_path.display());
        println!("(set {} to relocate)", DATA_DIR_ENV);
        println!();
        println!("Settings:");
        println!("  Currency symbol: {}", settings.currency_symbol);
        println!("  Date format:     {}", settings.date_format);
        println!("  Loan EMI ratio:  {}", settings.loan.max_emi_ratio);
        println!("  Loan tenure:     {} years", settings.loan.tenure_years);
        println!("  Loan rate:       {}", settings.loan.annual_interest_rate);
        return Ok(());
    }

    let mut service = LedgerService::new(LedgerStore::new(ledger_path));
    match service.load() {
        Ok(loaded) => {
            if !loaded.dropped.is_empty() {
                eprintln!(
                    "Warning: skipped {} invalid records in {}",
                    loaded.dropped.len(),
                    service.store().path().display()
                );
            }
        }
        Err(e) if e.is_load() => {
            eprintln!("Warning: {}. Starting with an empty ledger.", e);
        }
        Err(e) => return Err(e.into()),
    }

    match command {
        Commands::Add {
            kind,
            amount,
            category,
            date,
        } => handle_add(
            &mut service,
            &settings,
            kind,
            &amount,
            &category,
            date.as_deref(),
        )?,
        Commands::List { limit } => handle_list(&service, &settings, limit)?,
        Commands::Summary => handle_summary(&service, &settings)?,
        Commands::Loan(args) => handle_loan(&service, &settings, &args)?,
        Commands::Monthly { from } => handle_monthly(&service, &settings, from.as_deref())?,
        Commands::Export {
            format,
            output,
            compact,
        } => handle_export(&service, format, output, compact)?,
        Commands::Import { file } => handle_import(&mut service, &file)?,
        Commands::Backups => handle_backups(&service)?,
        Commands::Restore { backup } => handle_restore(&mut service, &backup)?,
        Commands::Config { .. } => {}
    }

    Ok(())
}
