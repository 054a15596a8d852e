//! CSV export functionality
//!
//! Writes the ledger as `Date,Type,Category,Amount (₹)` rows. The amount
//! column always holds the positive magnitude; the direction is in `Type`.

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Transaction, DATE_FORMAT};

/// Header of the amount column
pub const AMOUNT_COLUMN: &str = "Amount (₹)";

/// One row of the interchange CSV
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Amount (₹)")]
    pub amount: String,
}

impl From<&Transaction> for ExportRow {
    fn from(txn: &Transaction) -> Self {
        let magnitude = txn.magnitude();
        Self {
            date: txn.date().format(DATE_FORMAT).to_string(),
            kind: txn.kind().as_str().to_string(),
            category: txn.category().to_string(),
            amount: format!("{}.{:02}", magnitude.major(), magnitude.minor_part()),
        }
    }
}

/// Map the ledger to export rows, preserving ledger order
pub fn export_rows(transactions: &[Transaction]) -> Vec<ExportRow> {
    transactions.iter().map(ExportRow::from).collect()
}

/// Write rows as CSV with a header line
///
/// An empty ledger still produces the header.
pub fn write_csv<W: Write>(rows: &[ExportRow], writer: W) -> FinanceResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer
        .write_record(["Date", "Type", "Category", AMOUNT_COLUMN])
        .map_err(|e| FinanceError::Export(format!("Failed to write CSV header: {}", e)))?;

    for row in rows {
        csv_writer
            .serialize(row)
            .map_err(|e| FinanceError::Export(format!("Failed to write CSV row: {}", e)))?;
    }

    csv_writer
        .flush()
        .map_err(|e| FinanceError::Export(format!("Failed to flush CSV output: {}", e)))?;
    Ok(())
}

/// Export the ledger to CSV
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: W,
) -> FinanceResult<()> {
    write_csv(&export_rows(transactions), writer)
}

/// Default export file name for a given day, e.g. `finance_20250115.csv`
pub fn default_export_filename(date: NaiveDate) -> String {
    format!("finance_{}.csv", date.format("%Y%m%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(date: &str, category: &str, amount: &str, kind: &str) -> Transaction {
        Transaction::parse(date, category, amount, kind).unwrap()
    }

    fn render(transactions: &[Transaction]) -> String {
        let mut buffer = Vec::new();
        export_transactions_csv(transactions, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_empty_ledger_writes_header_only() {
        assert_eq!(render(&[]), "Date,Type,Category,Amount (₹)\n");
    }

    #[test]
    fn test_rows_use_magnitude() {
        let ledger = vec![
            txn("2025-01-01", "Salary", "50000", "Income"),
            txn("2025-01-02", "Food", "1234.5", "Expense"),
        ];

        let output = render(&ledger);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "2025-01-01,Income,Salary,50000.00");
        assert_eq!(lines[2], "2025-01-02,Expense,Food,1234.50");
    }

    #[test]
    fn test_category_with_comma_is_quoted() {
        let ledger = vec![txn("2025-01-02", "Food, drinks", "10", "Expense")];
        let output = render(&ledger);
        assert!(output.contains("\"Food, drinks\""));
    }

    #[test]
    fn test_default_filename() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(default_export_filename(date), "finance_20250115.csv");
    }
}
