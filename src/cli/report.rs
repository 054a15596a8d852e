//! CLI commands for reports
//!
//! Summary, monthly net flow and loan eligibility.

use clap::Args;

use crate::config::Settings;
use crate::display::{format_loan, format_monthly_flow, format_summary};
use crate::error::FinanceResult;
use crate::models::YearMonth;
use crate::reports::{LoanParams, MonthlyFlow};
use crate::services::LedgerService;

/// Overrides for the loan estimate; unset values come from settings
#[derive(Args, Debug, Clone, Default)]
pub struct LoanArgs {
    /// Share of disposable income available for the EMI (e.g. 0.4)
    #[arg(long)]
    pub ratio: Option<f64>,

    /// Loan tenure in years
    #[arg(long)]
    pub tenure: Option<u32>,

    /// Annual interest rate as a fraction (e.g. 0.09 for 9%)
    #[arg(long)]
    pub rate: Option<f64>,
}

impl LoanArgs {
    /// Apply the overrides on top of `defaults`
    pub fn resolve(&self, defaults: &LoanParams) -> LoanParams {
        LoanParams {
            max_emi_ratio: self.ratio.unwrap_or(defaults.max_emi_ratio),
            tenure_years: self.tenure.unwrap_or(defaults.tenure_years),
            annual_interest_rate: self.rate.unwrap_or(defaults.annual_interest_rate),
        }
    }
}

pub fn handle_summary(service: &LedgerService, settings: &Settings) -> FinanceResult<()> {
    print!(
        "{}",
        format_summary(
            &service.summary(),
            &service.expense_by_category(),
            &settings.currency_symbol
        )
    );
    Ok(())
}

pub fn handle_monthly(
    service: &LedgerService,
    settings: &Settings,
    from: Option<&str>,
) -> FinanceResult<()> {
    let from = from.map(YearMonth::parse).transpose()?;
    let flow = flow_from(service.monthly_net_flow(), from);
    print!("{}", format_monthly_flow(&flow, &settings.currency_symbol));
    Ok(())
}

/// Drop months before `from`, if given
fn flow_from(flow: Vec<MonthlyFlow>, from: Option<YearMonth>) -> Vec<MonthlyFlow> {
    match from {
        Some(from) => flow.into_iter().filter(|f| f.month >= from).collect(),
        None => flow,
    }
}

pub fn handle_loan(service: &LedgerService, settings: &Settings, args: &LoanArgs) -> FinanceResult<()> {
    let params = args.resolve(&settings.loan);
    let outcome = service.loan_eligibility(&params)?;
    print!("{}", format_loan(&outcome, &settings.currency_symbol));
    Ok(())
}
