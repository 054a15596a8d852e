//! Financial summary
//!
//! Totals over the whole ledger: income, expense, net savings and the
//! savings rate.

use serde::Serialize;

use crate::models::{Money, Transaction};

/// Income/expense totals for a ledger
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    /// Sum of all positive amounts
    pub total_income: Money,
    /// Absolute sum of all negative amounts
    pub total_expense: Money,
    /// `total_income - total_expense`
    pub net_savings: Money,
    /// Net savings as a percentage of income, 0 when there is no income
    pub savings_rate_pct: f64,
    /// Number of transactions summarised
    pub transaction_count: usize,
}

impl Summary {
    /// Summarise a ledger snapshot
    ///
    /// An empty ledger yields all-zero totals; check [`Summary::has_data`].
    pub fn generate(transactions: &[Transaction]) -> Self {
        let mut total_income = Money::zero();
        let mut total_expense = Money::zero();

        for txn in transactions {
            if txn.amount().is_positive() {
                total_income += txn.amount();
            } else {
                total_expense += txn.amount().abs();
            }
        }

        let net_savings = total_income - total_expense;
        let savings_rate_pct = if total_income.is_positive() {
            net_savings.minor() as f64 / total_income.minor() as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total_income,
            total_expense,
            net_savings,
            savings_rate_pct,
            transaction_count: transactions.len(),
        }
    }

    /// False for an empty ledger ("no transactions to analyze")
    pub fn has_data(&self) -> bool {
        self.transaction_count > 0
    }
}

/// Summarise a ledger snapshot
pub fn summary(transactions: &[Transaction]) -> Summary {
    Summary::generate(transactions)
}
