//! Metrics derived from a ledger snapshot
//!
//! Every report here is a pure function of the transactions passed in. None
//! of them mutate the ledger or touch the filesystem.

pub mod categories;
pub mod loan;
pub mod monthly;
pub mod summary;

pub use categories::{expense_by_category, CategoryTotal};
pub use loan::{
    estimate_from_averages, loan_eligibility, LoanEstimate, LoanOutcome, LoanParams,
    MonthlyAverages,
};
pub use monthly::{monthly_net_flow, months_observed, MonthlyFlow};
pub use summary::{summary, Summary};
