//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod backup;
pub mod export;
pub mod import;
pub mod report;
pub mod transaction;

pub use backup::{handle_backups, handle_restore};
pub use export::{handle_export, ExportFormat};
pub use import::handle_import;
pub use report::{handle_loan, handle_monthly, handle_summary, LoanArgs};
pub use transaction::{handle_add, handle_list, KindArg};
