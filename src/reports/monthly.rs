//! Monthly net cash flow
//!
//! The source series for bar charts: one entry per calendar month that has
//! at least one transaction, in chronological order.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Money, Transaction, YearMonth};

/// Signed net amount for one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyFlow {
    pub month: YearMonth,
    /// Income minus expense for the month
    pub net: Money,
    pub transaction_count: usize,
}

/// Net flow per month, oldest month first
///
/// Months without transactions are not synthesized.
pub fn monthly_net_flow(transactions: &[Transaction]) -> Vec<MonthlyFlow> {
    let mut by_month: BTreeMap<YearMonth, (Money, usize)> = BTreeMap::new();

    for txn in transactions {
        let entry = by_month.entry(txn.month()).or_insert((Money::zero(), 0));
        entry.0 += txn.amount();
        entry.1 += 1;
    }

    by_month
        .into_iter()
        .map(|(month, (net, transaction_count))| MonthlyFlow {
            month,
            net,
            transaction_count,
        })
        .collect()
}

/// Number of distinct calendar months present in the ledger
pub fn months_observed(transactions: &[Transaction]) -> usize {
    transactions
        .iter()
        .map(Transaction::month)
        .collect::<std::collections::BTreeSet<_>>()
        .len()
}
