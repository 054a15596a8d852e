//! Service layer for the finance tracker
//!
//! Business logic on top of the storage layer: validation on add, CSV
//! import, and the [`LedgerService`] front-ends talk to.

pub mod import;
pub mod ledger;

pub use import::{import_csv, import_rows, ImportOutcome, SkippedRow, IMPORT_COLUMNS};
pub use ledger::{LedgerService, LoadSummary, RestoreOutcome};
