//! Ledger service
//!
//! The single entry point front-ends use: owns one [`LedgerStore`] and the
//! in-memory ledger, validates additions, runs reports on the current
//! snapshot and persists on an explicit `save`.

use std::io::{Read, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use super::import::{self, ImportOutcome};
use crate::error::FinanceResult;
use crate::export::{self, FullExport, FullExportFormat};
use crate::models::Transaction;
use crate::reports::{self, CategoryTotal, LoanOutcome, LoanParams, MonthlyFlow, Summary};
use crate::storage::{BackupInfo, DroppedRecord, LedgerStore, SaveReport};

/// What a load or restore brought into memory
#[derive(Debug, Clone, Default)]
pub struct LoadSummary {
    /// Number of valid transactions now in the ledger
    pub loaded: usize,
    /// Records skipped during validation
    pub dropped: Vec<DroppedRecord>,
}

/// Result of restoring a backup over the live ledger
#[derive(Debug, Clone)]
pub struct RestoreOutcome {
    pub load: LoadSummary,
    pub save: SaveReport,
}

/// Service for ledger management
pub struct LedgerService {
    store: LedgerStore,
    transactions: Vec<Transaction>,
    dirty: bool,
}

impl LedgerService {
    /// Create a service over `store` with an empty in-memory ledger
    ///
    /// Nothing is read until [`LedgerService::load`] is called.
    pub fn new(store: LedgerStore) -> Self {
        Self {
            store,
            transactions: Vec::new(),
            dirty: false,
        }
    }

    /// The underlying store
    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    /// Replace the in-memory ledger with the file's contents
    ///
    /// On a `Load` error the ledger is reset to empty and the error is
    /// returned so the caller can report it.
    pub fn load(&mut self) -> FinanceResult<LoadSummary> {
        self.dirty = false;
        match self.store.load() {
            Ok(report) => {
                self.transactions = report.transactions;
                Ok(LoadSummary {
                    loaded: self.transactions.len(),
                    dropped: report.dropped,
                })
            }
            Err(e) => {
                warn!(error = %e, "Starting with an empty ledger");
                self.transactions.clear();
                Err(e)
            }
        }
    }

    /// Discard in-memory changes and read the file again
    pub fn reload(&mut self) -> FinanceResult<LoadSummary> {
        self.load()
    }

    /// Current ledger, in insertion order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Validate raw input and append it to the ledger
    ///
    /// On failure the ledger is unchanged.
    pub fn add_transaction(
        &mut self,
        date: &str,
        category: &str,
        amount: &str,
        kind: &str,
    ) -> FinanceResult<&Transaction> {
        let txn = Transaction::parse(date, category, amount, kind)?;
        debug!(transaction = %txn, "Adding transaction");
        Ok(self.push(txn))
    }

    fn push(&mut self, txn: Transaction) -> &Transaction {
        self.dirty = true;
        self.transactions.push(txn);
        &self.transactions[self.transactions.len() - 1]
    }

    /// Append every valid row of a CSV stream
    ///
    /// A missing column fails the import with no mutation.
    pub fn import_csv<R: Read>(&mut self, reader: R) -> FinanceResult<ImportOutcome> {
        let outcome = import::import_csv(reader)?;
        if outcome.imported_count > 0 {
            self.dirty = true;
            self.transactions.extend(outcome.transactions.iter().cloned());
        }
        info!(
            imported = outcome.imported_count,
            skipped = outcome.skipped_count(),
            "Imported CSV"
        );
        Ok(outcome)
    }

    /// Write the ledger in the CSV interchange format
    pub fn export_csv<W: Write>(&self, writer: W) -> FinanceResult<()> {
        export::export_transactions_csv(&self.transactions, writer)
    }

    /// Write the ledger and its summary as JSON or YAML
    pub fn export_full<W: Write>(&self, writer: W, format: FullExportFormat) -> FinanceResult<()> {
        FullExport::new(&self.transactions).write(writer, format)
    }

    pub fn summary(&self) -> Summary {
        reports::summary(&self.transactions)
    }

    pub fn expense_by_category(&self) -> Vec<CategoryTotal> {
        reports::expense_by_category(&self.transactions)
    }

    pub fn monthly_net_flow(&self) -> Vec<MonthlyFlow> {
        reports::monthly_net_flow(&self.transactions)
    }

    pub fn loan_eligibility(&self, params: &LoanParams) -> FinanceResult<LoanOutcome> {
        reports::loan_eligibility(&self.transactions, params)
    }

    /// The `limit` most recent transactions, newest date first
    ///
    /// Transactions on the same date are ordered newest-added first.
    pub fn recent(&self, limit: usize) -> Vec<&Transaction> {
        let mut ordered: Vec<(usize, &Transaction)> = self.transactions.iter().enumerate().collect();
        ordered.sort_by(|(ia, a), (ib, b)| b.date().cmp(&a.date()).then(ib.cmp(ia)));
        ordered.into_iter().take(limit).map(|(_, txn)| txn).collect()
    }

    /// Persist the ledger, backing up the current file first
    pub fn save(&mut self) -> FinanceResult<SaveReport> {
        let report = self.store.save(&self.transactions)?;
        self.dirty = false;
        Ok(report)
    }

    /// True when the ledger has changes not yet saved
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn list_backups(&self) -> FinanceResult<Vec<BackupInfo>> {
        self.store.list_backups()
    }

    /// Make a backup the live ledger
    ///
    /// The current file is itself backed up by the save, so a restore can
    /// be undone by restoring that backup.
    pub fn restore(&mut self, backup_path: &Path) -> FinanceResult<RestoreOutcome> {
        let report = self.store.restore(backup_path)?;
        self.transactions = report.transactions;
        self.dirty = true;

        let save = self.save()?;
        info!(backup = %backup_path.display(), restored = self.transactions.len(), "Restored backup");

        Ok(RestoreOutcome {
            load: LoadSummary {
                loaded: self.transactions.len(),
                dropped: report.dropped,
            },
            save,
        })
    }
}
