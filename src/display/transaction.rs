//! Transaction display formatting
//!
//! Renders transaction lists and backup listings as tables.

use std::fmt::Write;

use chrono::NaiveDate;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::truncate;
use crate::models::Transaction;
use crate::storage::BackupInfo;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Tabled)]
struct BackupRow {
    #[tabled(rename = "Backup")]
    filename: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Size")]
    size: String,
}

/// Format transactions as a table, one row each, in the given order
pub fn format_transaction_table<'a, I>(transactions: I, symbol: &str, date_format: &str) -> String
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let rows: Vec<TransactionRow> = transactions
        .into_iter()
        .map(|txn| TransactionRow {
            date: format_date(txn.date(), date_format),
            kind: txn.kind().as_str(),
            category: truncate(txn.category(), 30),
            amount: txn.amount().format_with_symbol(symbol),
        })
        .collect();

    if rows.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Format a backup listing, newest first as given
pub fn format_backup_list(backups: &[BackupInfo]) -> String {
    if backups.is_empty() {
        return "No backups found.\n".to_string();
    }

    let rows: Vec<BackupRow> = backups
        .iter()
        .map(|b| BackupRow {
            filename: b.filename.clone(),
            created: b.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            size: format_size(b.size_bytes),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Format a date with a strftime pattern, falling back to ISO form when the
/// pattern is invalid
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut formatted = String::new();
    if write!(formatted, "{}", date.format(pattern)).is_err() {
        return date.to_string();
    }
    formatted
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
