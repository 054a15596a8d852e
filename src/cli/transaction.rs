//! CLI commands for transactions
//!
//! Adding income/expense entries and listing recent activity.

use chrono::Local;
use clap::ValueEnum;

use crate::config::Settings;
use crate::display::format_transaction_table;
use crate::error::FinanceResult;
use crate::models::{TransactionKind, DATE_FORMAT};
use crate::services::LedgerService;

/// Direction of a new transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Income,
    Expense,
}

impl From<KindArg> for TransactionKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Income => TransactionKind::Income,
            KindArg::Expense => TransactionKind::Expense,
        }
    }
}

/// Handle `add`: validate, append and save
pub fn handle_add(
    service: &mut LedgerService,
    settings: &Settings,
    kind: KindArg,
    amount: &str,
    category: &str,
    date: Option<&str>,
) -> FinanceResult<()> {
    let today = Local::now().date_naive().format(DATE_FORMAT).to_string();
    let date = date.unwrap_or(&today);
    let kind = TransactionKind::from(kind);

    let added = service.add_transaction(date, category, amount, kind.as_str())?;
    let line = format!(
        "Added {}: {} {} on {}",
        added.kind().as_str().to_lowercase(),
        added.magnitude().format_with_symbol(&settings.currency_symbol),
        added.category(),
        added.date().format(DATE_FORMAT)
    );

    let report = service.save()?;
    println!("{}", line);
    if let Some(backup) = report.backup {
        println!("Previous ledger backed up to: {}", backup.display());
    }
    Ok(())
}

/// Handle `list`: most recent transactions first
pub fn handle_list(service: &LedgerService, settings: &Settings, limit: usize) -> FinanceResult<()> {
    let recent = service.recent(limit);
    print!(
        "{}",
        format_transaction_table(recent, &settings.currency_symbol, &settings.date_format)
    );
    if service.len() > limit {
        println!("Showing {} of {} transactions.", limit, service.len());
    }
    Ok(())
}
