//! Finance tracker - personal income/expense ledger
//!
//! This library records dated, categorised income and expense transactions
//! in a local JSON file and derives reports from them: totals and savings
//! rate, expense by category, monthly net flow and a loan eligibility
//! estimate.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, money, months)
//! - `storage`: JSON ledger file with backup-on-save
//! - `reports`: Pure metrics over a ledger snapshot
//! - `services`: Ledger service and CSV import
//! - `export`: CSV, JSON and YAML export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `fintrack` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use finance_tracker::services::LedgerService;
//! use finance_tracker::storage::LedgerStore;
//!
//! let mut service = LedgerService::new(LedgerStore::new("finance_data.json"));
//! service.load()?;
//! service.add_transaction("2025-01-15", "Groceries", "1500", "Expense")?;
//! service.save()?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod log;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FinanceError, FinanceResult};
