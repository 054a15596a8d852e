//! Transaction model
//!
//! A transaction is one dated income or expense entry. The `kind` is the
//! authoritative direction; the sign of `amount` is derived from it when the
//! transaction is constructed and can never disagree with it afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;
use super::month::YearMonth;
use crate::error::{FinanceError, FinanceResult};

/// The only accepted date representation
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// The canonical label stored on disk and in CSV files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    /// Apply this kind's sign to a positive magnitude
    pub fn signed(&self, magnitude: Money) -> Money {
        match self {
            Self::Income => magnitude.abs(),
            Self::Expense => -magnitude.abs(),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = FinanceError;

    /// Exact, case-sensitive match on `Income` or `Expense`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Income" => Ok(Self::Income),
            "Expense" => Ok(Self::Expense),
            other => Err(FinanceError::Validation(format!(
                "Type must be 'Income' or 'Expense', got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single income or expense entry
///
/// Serializes with exactly the keys `Date`, `Category`, `Amount`, `Type`.
/// There is deliberately no `Deserialize`: records read from disk go through
/// [`Transaction::new`] so the invariants hold for every instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    #[serde(rename = "Date")]
    date: NaiveDate,

    #[serde(rename = "Category")]
    category: String,

    /// Positive for income, negative for expense
    #[serde(rename = "Amount")]
    amount: Money,

    #[serde(rename = "Type")]
    kind: TransactionKind,
}

impl Transaction {
    /// Create a transaction from a positive magnitude
    ///
    /// The stored amount is `+magnitude` for income and `-magnitude` for
    /// expense. The category is trimmed.
    pub fn new(
        date: NaiveDate,
        category: impl AsRef<str>,
        magnitude: Money,
        kind: TransactionKind,
    ) -> FinanceResult<Self> {
        let category = category.as_ref().trim();
        if category.is_empty() {
            return Err(FinanceError::validation("Category is required"));
        }
        if !magnitude.is_positive() {
            return Err(FinanceError::validation(format!(
                "Amount must be positive, got {}",
                magnitude.format_with_symbol("")
            )));
        }

        Ok(Self {
            date,
            category: category.to_string(),
            amount: kind.signed(magnitude),
            kind,
        })
    }

    /// Validate raw user input and build a transaction
    ///
    /// `amount` is the positive magnitude as typed by the user; a
    /// pre-negated or zero amount is rejected.
    pub fn parse(date: &str, category: &str, amount: &str, kind: &str) -> FinanceResult<Self> {
        let kind: TransactionKind = kind.trim().parse()?;
        let date = parse_date(date)?;
        let magnitude = Money::parse(amount).map_err(|e| FinanceError::Validation(e.to_string()))?;
        Self::new(date, category, magnitude, kind)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Signed amount (positive for income, negative for expense)
    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// Unsigned amount
    pub fn magnitude(&self) -> Money {
        self.amount.abs()
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// The calendar month this transaction falls in
    pub fn month(&self) -> YearMonth {
        YearMonth::of(self.date)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format(DATE_FORMAT),
            self.kind,
            self.category,
            self.amount
        )
    }
}

/// Parse a strict `YYYY-MM-DD` calendar date
pub fn parse_date(s: &str) -> FinanceResult<NaiveDate> {
    let s = s.trim();
    let well_formed = s.len() == 10
        && s.char_indices().all(|(i, c)| match i {
            4 | 7 => c == '-',
            _ => c.is_ascii_digit(),
        });

    if !well_formed {
        return Err(FinanceError::Validation(format!(
            "Invalid date '{}'. Use YYYY-MM-DD",
            s
        )));
    }

    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|_| FinanceError::Validation(format!("'{}' is not a real calendar date", s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_signs_amount_from_kind() {
        let income = Transaction::new(
            date(2025, 1, 15),
            "Salary",
            Money::from_major(50000),
            TransactionKind::Income,
        )
        .unwrap();
        assert_eq!(income.amount(), Money::from_major(50000));
        assert!(income.is_income());

        let expense = Transaction::new(
            date(2025, 1, 15),
            "Rent",
            Money::from_major(15000),
            TransactionKind::Expense,
        )
        .unwrap();
        assert_eq!(expense.amount(), Money::from_major(-15000));
        assert_eq!(expense.magnitude(), Money::from_major(15000));
        assert!(expense.is_expense());
    }

    #[test]
    fn test_category_is_trimmed_and_required() {
        let txn = Transaction::new(
            date(2025, 1, 15),
            "  Groceries ",
            Money::from_major(10),
            TransactionKind::Expense,
        )
        .unwrap();
        assert_eq!(txn.category(), "Groceries");

        let err = Transaction::new(
            date(2025, 1, 15),
            "   ",
            Money::from_major(10),
            TransactionKind::Expense,
        )
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_parse_valid_input() {
        let txn = Transaction::parse("2025-01-01", "Food", "100", "Expense").unwrap();
        assert_eq!(txn.date(), date(2025, 1, 1));
        assert_eq!(txn.amount(), Money::from_major(-100));
        assert_eq!(txn.kind(), TransactionKind::Expense);
    }

    #[test]
    fn test_parse_rejects_negative_and_zero_amounts() {
        assert!(Transaction::parse("2025-01-01", "Food", "-50", "Expense")
            .unwrap_err()
            .is_validation());
        assert!(Transaction::parse("2025-01-01", "Food", "0", "Expense")
            .unwrap_err()
            .is_validation());
        assert!(Transaction::parse("2025-01-01", "Food", "lots", "Income")
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_parse_rejects_bad_kind() {
        let err = Transaction::parse("2025-01-01", "Refund", "10", "Refund").unwrap_err();
        assert!(err.is_validation());
        assert!(Transaction::parse("2025-01-01", "Salary", "10", "income").is_err());
    }

    #[test]
    fn test_parse_date_is_strict() {
        assert_eq!(parse_date("2024-02-29").unwrap(), date(2024, 2, 29));
        assert!(parse_date("2025-02-29").is_err());
        assert!(parse_date("2025-1-5").is_err());
        assert!(parse_date("01/05/2025").is_err());
        assert!(parse_date("2025-01-05T10:00").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_serialization_keys_and_order() {
        let txn = Transaction::parse("2025-01-01", "Food", "100.5", "Expense").unwrap();
        let json = serde_json::to_string(&txn).unwrap();
        assert_eq!(
            json,
            r#"{"Date":"2025-01-01","Category":"Food","Amount":-100.5,"Type":"Expense"}"#
        );
    }

    #[test]
    fn test_month() {
        let txn = Transaction::parse("2025-03-31", "Food", "1", "Expense").unwrap();
        assert_eq!(txn.month().to_string(), "2025-03");
    }

    #[test]
    fn test_display() {
        let txn = Transaction::parse("2025-01-15", "Test Store", "50", "Expense").unwrap();
        assert_eq!(format!("{}", txn), "2025-01-15 Expense Test Store -₹50.00");
    }
}
