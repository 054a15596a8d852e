//! CSV import service
//!
//! Accepts the same `Date,Type,Category,Amount (₹)` layout that export
//! writes. A missing column fails the whole import; a bad row is skipped and
//! reported, never fatal.

use std::collections::HashMap;
use std::io::Read;

use csv::{ByteRecord, ReaderBuilder, Trim};
use serde::Serialize;
use tracing::debug;

use crate::error::{FinanceError, FinanceResult};
use crate::export::AMOUNT_COLUMN;
use crate::models::Transaction;

/// Columns an import file must carry, in export order
pub const IMPORT_COLUMNS: [&str; 4] = ["Date", "Type", "Category", AMOUNT_COLUMN];

/// A data row that could not be imported
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// 1-based data row number, header excluded
    pub row: usize,
    pub reason: String,
}

/// Result of parsing an import source
#[derive(Debug, Clone, Default)]
pub struct ImportOutcome {
    /// Valid rows, in file order
    pub transactions: Vec<Transaction>,
    pub imported_count: usize,
    pub skipped: Vec<SkippedRow>,
}

impl ImportOutcome {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Column positions resolved from a header row
struct ColumnIndex {
    date: usize,
    kind: usize,
    category: usize,
    amount: usize,
}

impl ColumnIndex {
    fn resolve(headers: &[String]) -> FinanceResult<Self> {
        let positions: HashMap<&str, usize> = headers
            .iter()
            .enumerate()
            .rev()
            .map(|(i, h)| (h.trim(), i))
            .collect();

        let missing: Vec<String> = IMPORT_COLUMNS
            .iter()
            .filter(|col| !positions.contains_key(*col))
            .map(|col| col.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(FinanceError::Schema { missing });
        }

        Ok(Self {
            date: positions[IMPORT_COLUMNS[0]],
            kind: positions[IMPORT_COLUMNS[1]],
            category: positions[IMPORT_COLUMNS[2]],
            amount: positions[IMPORT_COLUMNS[3]],
        })
    }
}

/// Convert tabular rows into transactions
///
/// Header cells are trimmed before matching. Each row is validated like a
/// manual add, except that the date is cut to its first 10 characters so
/// `2025-01-15 08:30:00` is accepted.
pub fn import_rows(headers: &[String], rows: &[Vec<String>]) -> FinanceResult<ImportOutcome> {
    import_records(headers, rows.iter().map(|row| Ok(row.as_slice())))
}

/// Import rows that may already have failed to decode
///
/// An `Err` row is recorded as skipped with its reason.
fn import_records<'a, I>(headers: &[String], rows: I) -> FinanceResult<ImportOutcome>
where
    I: IntoIterator<Item = Result<&'a [String], String>>,
{
    let columns = ColumnIndex::resolve(headers)?;
    let mut outcome = ImportOutcome::default();

    for (i, row) in rows.into_iter().enumerate() {
        let row_number = i + 1;
        match row.and_then(|row| parse_row(row, &columns)) {
            Ok(txn) => outcome.transactions.push(txn),
            Err(reason) => {
                debug!(row = row_number, %reason, "Skipping import row");
                outcome.skipped.push(SkippedRow {
                    row: row_number,
                    reason,
                });
            }
        }
    }

    outcome.imported_count = outcome.transactions.len();
    Ok(outcome)
}

fn parse_row(row: &[String], columns: &ColumnIndex) -> Result<Transaction, String> {
    let cell = |index: usize, name: &str| {
        row.get(index)
            .map(String::as_str)
            .ok_or_else(|| format!("Missing {} value", name))
    };

    let date: String = cell(columns.date, "Date")?.trim().chars().take(10).collect();
    let kind = cell(columns.kind, "Type")?;
    let category = cell(columns.category, "Category")?;
    let amount = cell(columns.amount, "Amount")?;

    Transaction::parse(&date, category, amount, kind).map_err(|e| match e {
        FinanceError::Validation(reason) => reason,
        other => other.to_string(),
    })
}

/// Read a CSV stream with a header row and import it
pub fn import_csv<R: Read>(reader: R) -> FinanceResult<ImportOutcome> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| FinanceError::Import(format!("Failed to read CSV header: {}", e)))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows: Vec<Result<Vec<String>, String>> = Vec::new();
    for record in csv_reader.byte_records() {
        match record {
            Ok(record) => rows.push(decode_record(&record)),
            Err(e) if e.is_io_error() => {
                return Err(FinanceError::Import(format!(
                    "Failed to read CSV record: {}",
                    e
                )));
            }
            Err(e) => rows.push(Err(format!("Unreadable CSV record: {}", e))),
        }
    }

    debug!(rows = rows.len(), "Read import file");
    import_records(
        &headers,
        rows.iter().map(|row| row.as_deref().map_err(Clone::clone)),
    )
}

fn decode_record(record: &ByteRecord) -> Result<Vec<String>, String> {
    record
        .iter()
        .enumerate()
        .map(|(i, field)| {
            std::str::from_utf8(field)
                .map(str::to_string)
                .map_err(|_| format!("Field {} is not valid UTF-8", i + 1))
        })
        .collect()
}
