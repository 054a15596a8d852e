//! Display formatting for terminal output

pub mod report;
pub mod transaction;

pub use report::{
    format_category_breakdown, format_loan, format_monthly_flow, format_summary,
};
pub use transaction::{format_backup_list, format_date, format_transaction_table};
