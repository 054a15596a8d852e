//! Expense breakdown by category
//!
//! Groups expense transactions by category label, largest first. Categories
//! are encountered in date order, and ties keep that first-encountered order.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Money, Transaction};

/// Total expense for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// Category label
    pub category: String,
    /// Absolute expense total
    pub total: Money,
    /// Number of expense transactions in this category
    pub transaction_count: usize,
    /// Share of all expense, in percent
    pub share_pct: f64,
}

/// Expense totals per category, sorted descending by total
///
/// Returns an empty vec when there are no expenses.
pub fn expense_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut chronological: Vec<&Transaction> =
        transactions.iter().filter(|t| t.is_expense()).collect();
    chronological.sort_by_key(|t| t.date());

    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for txn in chronological {
        let index = *positions.entry(txn.category()).or_insert_with(|| {
            totals.push(CategoryTotal {
                category: txn.category().to_string(),
                total: Money::zero(),
                transaction_count: 0,
                share_pct: 0.0,
            });
            totals.len() - 1
        });

        let entry = &mut totals[index];
        entry.total += txn.magnitude();
        entry.transaction_count += 1;
    }

    let grand_total: Money = totals.iter().map(|c| c.total).sum();
    if grand_total.is_positive() {
        for entry in &mut totals {
            entry.share_pct = entry.total.minor() as f64 / grand_total.minor() as f64 * 100.0;
        }
    }

    // sort_by is stable, so equal totals stay in first-encountered order
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}
