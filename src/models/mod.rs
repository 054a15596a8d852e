//! Core data models for the finance tracker
//!
//! This module contains the data structures that represent the ledger
//! domain: transactions, money amounts and calendar months.

pub mod money;
pub mod month;
pub mod transaction;

pub use money::{Money, MoneyParseError};
pub use month::YearMonth;
pub use transaction::{parse_date, Transaction, TransactionKind, DATE_FORMAT};
