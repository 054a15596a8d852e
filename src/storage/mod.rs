//! Storage layer for the finance tracker
//!
//! Provides the JSON ledger store with backup-on-save and per-record
//! validation on load.

pub mod backup;
pub mod file_io;
pub mod ledger_store;

pub use backup::BackupInfo;
pub use file_io::{read_json_value, write_json_pretty};
pub use ledger_store::{
    validate_record, DroppedRecord, LedgerStore, LoadReport, RecordOutcome, SaveReport,
    REQUIRED_KEYS,
};
