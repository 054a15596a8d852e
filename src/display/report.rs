//! Report formatting for terminal output
//!
//! Renders summaries, category breakdowns, monthly flow bars and loan
//! estimates as plain text.

use crate::models::Money;
use crate::reports::{CategoryTotal, LoanOutcome, MonthlyFlow, Summary};

const REPORT_WIDTH: usize = 60;
const BAR_WIDTH: usize = 24;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct.abs() < 0.1 && pct != 0.0 {
        format!("{:.2}%", pct)
    } else if pct.abs() < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a header line with padding
pub fn format_header(title: &str, width: usize) -> String {
    let len = title.chars().count();
    let padding = if len >= width { 0 } else { (width - len) / 2 };
    format!("{}{}", " ".repeat(padding), title)
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

/// Format the financial summary with the expense breakdown
pub fn format_summary(summary: &Summary, categories: &[CategoryTotal], symbol: &str) -> String {
    if !summary.has_data() {
        return "No transactions to analyze.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format_header("Financial Summary", REPORT_WIDTH));
    output.push('\n');
    output.push_str(&double_separator(REPORT_WIDTH));
    output.push('\n');

    output.push_str(&format!(
        "Total Income:   {:>20}\n",
        summary.total_income.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Total Expenses: {:>20}\n",
        summary.total_expense.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Net Savings:    {:>20}\n",
        summary.net_savings.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Savings Rate:   {:>20}\n",
        format!("{:.1}%", summary.savings_rate_pct)
    ));
    output.push_str(&format!("Transactions:   {:>20}\n", summary.transaction_count));

    output.push('\n');
    output.push_str(&format_category_breakdown(categories, symbol));
    output
}

/// Format expense totals per category with share bars
pub fn format_category_breakdown(categories: &[CategoryTotal], symbol: &str) -> String {
    let mut output = String::new();
    output.push_str("Expense by Category\n");
    output.push_str(&separator(REPORT_WIDTH));
    output.push('\n');

    if categories.is_empty() {
        output.push_str("No expense data.\n");
        return output;
    }

    for entry in categories {
        output.push_str(&format!(
            "{:<18} {:>14} {:>6} {}\n",
            truncate(&entry.category, 18),
            entry.total.format_with_symbol(symbol),
            format_percentage(entry.share_pct),
            format_bar(entry.share_pct, 100.0, 16)
        ));
    }
    output
}

/// Format monthly net flow as a text bar chart
///
/// Surplus months draw `█` bars, deficit months draw `▒` bars; bars are
/// scaled to the largest absolute month.
pub fn format_monthly_flow(flows: &[MonthlyFlow], symbol: &str) -> String {
    if flows.is_empty() {
        return "No transactions to chart.\n".to_string();
    }

    let max_abs = flows
        .iter()
        .map(|f| f.net.abs().minor())
        .max()
        .unwrap_or(0) as f64;

    let mut output = String::new();
    output.push_str(&format_header("Monthly Net Flow", REPORT_WIDTH));
    output.push('\n');
    output.push_str(&double_separator(REPORT_WIDTH));
    output.push('\n');

    for flow in flows {
        let magnitude = flow.net.abs().minor() as f64;
        let bar = format_bar(magnitude, max_abs, BAR_WIDTH);
        let bar = if flow.net.is_negative() {
            bar.replace('█', "▒")
        } else {
            bar
        };
        output.push_str(&format!(
            "{}  {:>16}  {}\n",
            flow.month,
            flow.net.format_whole(symbol),
            bar.trim_end()
        ));
    }
    output
}

/// Format a loan eligibility estimate
pub fn format_loan(outcome: &LoanOutcome, symbol: &str) -> String {
    let money = |value: f64| {
        Money::from_f64(value)
            .map(|m| m.format_whole(symbol))
            .unwrap_or_else(|| format!("{}{:.0}", symbol, value))
    };

    match outcome {
        LoanOutcome::NoData => "No transactions to analyze.\n".to_string(),
        LoanOutcome::InsufficientIncome(averages) => format!(
            "Not eligible: average monthly expenses ({}) leave no disposable income \
             (average income {}).\n",
            money(averages.avg_monthly_expense),
            money(averages.avg_monthly_income)
        ),
        LoanOutcome::Eligible(estimate) => {
            let mut output = String::new();
            output.push_str(&format_header("Loan Eligibility", REPORT_WIDTH));
            output.push('\n');
            output.push_str(&double_separator(REPORT_WIDTH));
            output.push('\n');
            output.push_str(&format!(
                "Avg Monthly Income:    {:>18}\n",
                money(estimate.avg_monthly_income)
            ));
            output.push_str(&format!(
                "Avg Monthly Expenses:  {:>18}\n",
                money(estimate.avg_monthly_expense)
            ));
            output.push_str(&format!(
                "Disposable Income:     {:>18}\n",
                money(estimate.disposable)
            ));
            output.push_str(&format!(
                "Max EMI ({:.0}%):         {:>18}\n",
                estimate.max_emi_ratio * 100.0,
                money(estimate.max_emi)
            ));
            output.push_str(&separator(REPORT_WIDTH));
            output.push('\n');
            output.push_str(&format!(
                "Eligible Loan Amount:  {:>18}\n",
                money(estimate.loan_amount)
            ));
            output.push_str(&format!(
                "({:.1}% annual interest, {} years, based on {} month(s) of data)\n",
                estimate.annual_interest_rate * 100.0,
                estimate.tenure_years,
                estimate.months_observed
            ));
            output
        }
    }
}
