//! Ledger store for JSON persistence
//!
//! The ledger file is a JSON array of records with the keys `Date`,
//! `Category`, `Amount` and `Type`. Loading validates every record on its
//! own and reports the ones it had to drop; saving renames any existing file
//! to a timestamped backup before writing the new array.

use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::backup::{self, BackupInfo};
use super::file_io::{read_json_value, write_json_pretty};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{parse_date, Money, Transaction, TransactionKind};

/// Keys every persisted record must carry
pub const REQUIRED_KEYS: [&str; 4] = ["Date", "Category", "Amount", "Type"];

/// Record shape on disk, before validation
#[derive(Debug, Deserialize)]
struct StoredRecord {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Amount")]
    amount: Money,
    #[serde(rename = "Type")]
    kind: String,
}

/// A record that could not be turned into a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedRecord {
    /// Position in the JSON array (0-based)
    pub index: usize,
    /// Why it was dropped
    pub reason: String,
}

/// Outcome of validating one persisted record
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Valid(Transaction),
    Dropped(DroppedRecord),
}

/// Result of loading a ledger file
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Records that passed validation, in file order
    pub transactions: Vec<Transaction>,
    /// Records that were skipped
    pub dropped: Vec<DroppedRecord>,
}

impl LoadReport {
    /// Number of records skipped during load
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }

    fn from_outcomes(outcomes: impl IntoIterator<Item = RecordOutcome>) -> Self {
        let mut report = Self::default();
        for outcome in outcomes {
            match outcome {
                RecordOutcome::Valid(txn) => report.transactions.push(txn),
                RecordOutcome::Dropped(dropped) => report.dropped.push(dropped),
            }
        }
        report
    }
}

/// Result of a save
#[derive(Debug, Clone)]
pub struct SaveReport {
    /// The ledger file that was written
    pub path: PathBuf,
    /// Where the previous file was moved, if there was one
    pub backup: Option<PathBuf>,
    /// Number of transactions written
    pub written: usize,
}

/// Validate one element of the persisted array
///
/// `Type` is authoritative: the stored amount's magnitude is re-signed from
/// it, so a record whose sign disagrees with its type is corrected rather
/// than dropped.
pub fn validate_record(index: usize, value: &serde_json::Value) -> RecordOutcome {
    let dropped = |reason: String| RecordOutcome::Dropped(DroppedRecord { index, reason });

    let Some(object) = value.as_object() else {
        return dropped("record is not a JSON object".to_string());
    };

    let missing: Vec<&str> = REQUIRED_KEYS
        .iter()
        .copied()
        .filter(|key| !object.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return dropped(format!("missing keys: {}", missing.join(", ")));
    }

    let record = match StoredRecord::deserialize(value) {
        Ok(record) => record,
        Err(e) => return dropped(e.to_string()),
    };

    let build = || -> FinanceResult<Transaction> {
        let kind: TransactionKind = record.kind.trim().parse()?;
        let date = parse_date(&record.date)?;
        Transaction::new(date, &record.category, record.amount.abs(), kind)
    };

    match build() {
        Ok(txn) => RecordOutcome::Valid(txn),
        Err(e) => dropped(e.to_string()),
    }
}

/// Persists one ledger to one JSON file
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    /// Create a store bound to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The ledger file this store reads and writes
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the ledger
    ///
    /// A missing file is an empty ledger. An unreadable or malformed file,
    /// or one whose top-level value is not an array, is a `Load` error.
    pub fn load(&self) -> FinanceResult<LoadReport> {
        let report = load_file(&self.path)?;
        debug!(
            path = %self.path.display(),
            loaded = report.transactions.len(),
            dropped = report.dropped_count(),
            "loaded ledger"
        );
        Ok(report)
    }

    /// Write the full ledger, backing up any existing file first
    ///
    /// The existing file is renamed, not copied. A crash between the rename
    /// and the write leaves only the backup.
    pub fn save(&self, transactions: &[Transaction]) -> FinanceResult<SaveReport> {
        let backup = if self.path.exists() {
            Some(backup::rename_to_backup(
                &self.path,
                Local::now().naive_local(),
            )?)
        } else {
            None
        };

        write_json_pretty(&self.path, transactions)?;
        debug!(
            path = %self.path.display(),
            written = transactions.len(),
            "saved ledger"
        );

        Ok(SaveReport {
            path: self.path.clone(),
            backup,
            written: transactions.len(),
        })
    }

    /// List backups of this ledger, newest first
    pub fn list_backups(&self) -> FinanceResult<Vec<BackupInfo>> {
        backup::list_backups(&self.path)
    }

    /// Read the records of a backup file with the same validation as `load`
    pub fn restore(&self, backup_path: &Path) -> FinanceResult<LoadReport> {
        if !backup_path.exists() {
            return Err(FinanceError::Storage(format!(
                "Backup not found: {}",
                backup_path.display()
            )));
        }
        load_file(backup_path)
    }
}

fn load_file(path: &Path) -> FinanceResult<LoadReport> {
    let Some(value) = read_json_value(path)? else {
        debug!(path = %path.display(), "no ledger file, starting empty");
        return Ok(LoadReport::default());
    };

    let serde_json::Value::Array(records) = value else {
        return Err(FinanceError::Load(format!(
            "{} does not contain a JSON array",
            path.display()
        )));
    };

    let report = LoadReport::from_outcomes(
        records
            .iter()
            .enumerate()
            .map(|(index, value)| validate_record(index, value)),
    );

    for dropped in &report.dropped {
        warn!(index = dropped.index, reason = %dropped.reason, "dropped ledger record");
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::parse("2025-01-01", "Salary", "50000", "Income").unwrap(),
            Transaction::parse("2025-01-03", "Rent", "15000", "Expense").unwrap(),
            Transaction::parse("2025-02-10", "Groceries", "2500.75", "Expense").unwrap(),
        ]
    }

    fn create_store() -> (TempDir, LedgerStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = LedgerStore::new(temp_dir.path().join("finance_data.json"));
        (temp_dir, store)
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let (_temp, store) = create_store();
        let report = store.load().unwrap();
        assert!(report.transactions.is_empty());
        assert_eq!(report.dropped_count(), 0);
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let (_temp, store) = create_store();
        fs::write(store.path(), "{ not json").unwrap();
        assert!(store.load().unwrap_err().is_load());
    }

    #[test]
    fn test_load_non_array_fails() {
        let (_temp, store) = create_store();
        fs::write(store.path(), r#"{"Date": "2025-01-01"}"#).unwrap();
        assert!(store.load().unwrap_err().is_load());
    }

    #[test]
    fn test_load_drops_records_missing_keys() {
        let (_temp, store) = create_store();
        let data = json!([
            {"Date": "2025-01-01", "Category": "Salary", "Amount": 1000.0, "Type": "Income"},
            {"Date": "2025-01-02", "Category": "Food", "Amount": -20.0},
            "not an object",
            {"Date": "2025-01-03", "Category": "Food", "Amount": -30.0, "Type": "Expense", "Note": "extra"}
        ]);
        fs::write(store.path(), data.to_string()).unwrap();

        let report = store.load().unwrap();
        assert_eq!(report.transactions.len(), 2);
        assert_eq!(report.dropped_count(), 2);
        assert_eq!(report.dropped[0].index, 1);
        assert!(report.dropped[0].reason.contains("Type"));
        assert_eq!(report.dropped[1].index, 2);
    }

    #[test]
    fn test_load_drops_invalid_values() {
        let (_temp, store) = create_store();
        let data = json!([
            {"Date": "2025-02-30", "Category": "Food", "Amount": -20.0, "Type": "Expense"},
            {"Date": "2025-01-01", "Category": "Food", "Amount": 0, "Type": "Expense"},
            {"Date": "2025-01-01", "Category": "", "Amount": -5, "Type": "Expense"},
            {"Date": "2025-01-01", "Category": "Gift", "Amount": 5, "Type": "Refund"},
            {"Date": "2025-01-01", "Category": "Food", "Amount": "12", "Type": "Expense"}
        ]);
        fs::write(store.path(), data.to_string()).unwrap();

        let report = store.load().unwrap();
        assert!(report.transactions.is_empty());
        assert_eq!(report.dropped_count(), 5);
    }

    #[test]
    fn test_load_resigns_amount_from_type() {
        let (_temp, store) = create_store();
        let data = json!([
            {"Date": "2025-01-01", "Category": "Food", "Amount": 20.0, "Type": "Expense"}
        ]);
        fs::write(store.path(), data.to_string()).unwrap();

        let report = store.load().unwrap();
        assert_eq!(report.transactions[0].amount(), Money::from_major(-20));
    }

    #[test]
    fn test_save_writes_canonical_records() {
        let (_temp, store) = create_store();
        let report = store.save(&sample()).unwrap();
        assert!(report.backup.is_none());
        assert_eq!(report.written, 3);

        let contents = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        let first = value[0].as_object().unwrap();
        let keys: Vec<_> = first.keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 4);
        for key in REQUIRED_KEYS {
            assert!(first.contains_key(key));
        }
        assert_eq!(value[1]["Amount"], json!(-15000.0));
        assert_eq!(value[1]["Type"], json!("Expense"));
        assert!(contents.starts_with("[\n    {"));
    }

    #[test]
    fn test_save_renames_existing_file_to_backup() {
        let (temp, store) = create_store();
        store.save(&sample()[..1]).unwrap();
        let original = fs::read_to_string(store.path()).unwrap();

        let report = store.save(&sample()).unwrap();
        let backup = report.backup.unwrap();
        assert!(backup
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("finance_data.json.backup_"));
        assert_eq!(backup.parent().unwrap(), temp.path());
        assert_eq!(fs::read_to_string(&backup).unwrap(), original);

        assert_eq!(store.load().unwrap().transactions.len(), 3);
    }

    #[test]
    fn test_every_save_leaves_a_distinct_backup() {
        let (_temp, store) = create_store();
        store.save(&sample()).unwrap();
        store.save(&sample()).unwrap();
        store.save(&sample()).unwrap();

        assert_eq!(store.list_backups().unwrap().len(), 2);
    }

    #[test]
    fn test_round_trip_preserves_transactions() {
        let (_temp, store) = create_store();
        let original = sample();

        store.save(&original).unwrap();
        let loaded = store.load().unwrap().transactions;
        store.save(&loaded).unwrap();
        let reloaded = store.load().unwrap().transactions;

        assert_eq!(reloaded, original);
    }

    #[test]
    fn test_largest_accepted_amount_survives_reload() {
        let (_temp, store) = create_store();
        let largest = vec![
            Transaction::parse("2025-01-01", "Windfall", "10000000000000", "Income").unwrap(),
            Transaction::parse("2025-01-02", "Yacht", "9999999999999.99", "Expense").unwrap(),
        ];
        assert!(Transaction::parse("2025-01-01", "Windfall", "10000000000000.01", "Income").is_err());

        store.save(&largest).unwrap();
        let report = store.load().unwrap();

        assert!(report.dropped.is_empty());
        assert_eq!(report.transactions, largest);
    }

    #[test]
    fn test_restore_reads_backup() {
        let (_temp, store) = create_store();
        store.save(&sample()[..1]).unwrap();
        let backup = store.save(&sample()).unwrap().backup.unwrap();

        let report = store.restore(&backup).unwrap();
        assert_eq!(report.transactions, sample()[..1].to_vec());

        let missing = store.path().with_file_name("nope.json");
        assert!(store.restore(&missing).is_err());
    }
}
