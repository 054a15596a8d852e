//! Loan eligibility estimate
//!
//! Estimates the largest principal whose equal monthly installment (EMI)
//! fits within a fixed share of average monthly disposable income. This is a
//! rough affordability figure, not an underwriting decision.

use serde::{Deserialize, Serialize};

use super::monthly::months_observed;
use super::summary::Summary;
use crate::error::{FinanceError, FinanceResult};
use crate::models::Transaction;

/// Parameters of the estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanParams {
    /// Share of disposable income available for the EMI
    pub max_emi_ratio: f64,
    /// Loan tenure in years
    pub tenure_years: u32,
    /// Annual interest rate as a fraction (0.09 = 9%)
    pub annual_interest_rate: f64,
}

impl Default for LoanParams {
    fn default() -> Self {
        Self {
            max_emi_ratio: 0.4,
            tenure_years: 20,
            annual_interest_rate: 0.09,
        }
    }
}

impl LoanParams {
    /// Check that the parameters describe a meaningful loan
    pub fn validate(&self) -> FinanceResult<()> {
        if !(self.max_emi_ratio > 0.0 && self.max_emi_ratio <= 1.0) {
            return Err(FinanceError::Validation(format!(
                "EMI ratio must be in (0, 1], got {}",
                self.max_emi_ratio
            )));
        }
        if self.tenure_years == 0 {
            return Err(FinanceError::validation("Tenure must be at least one year"));
        }
        if !(self.annual_interest_rate >= 0.0 && self.annual_interest_rate < 1.0) {
            return Err(FinanceError::Validation(format!(
                "Annual interest rate must be in [0, 1), got {}",
                self.annual_interest_rate
            )));
        }
        Ok(())
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_interest_rate / 12.0
    }

    /// Number of monthly installments
    pub fn installments(&self) -> u32 {
        self.tenure_years * 12
    }

    /// Principal repayable by `emi` per month over the tenure
    ///
    /// `emi * ((1+r)^n - 1) / (r * (1+r)^n)`, or `emi * n` at zero interest.
    pub fn principal_for_emi(&self, emi: f64) -> f64 {
        let r = self.monthly_rate();
        let n = self.installments() as f64;
        if r == 0.0 {
            return emi * n;
        }
        let growth = (1.0 + r).powf(n);
        emi * (growth - 1.0) / (r * growth)
    }
}

/// Monthly averages the estimate is based on
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyAverages {
    pub avg_monthly_income: f64,
    pub avg_monthly_expense: f64,
    /// Income minus expense
    pub disposable: f64,
    /// Distinct calendar months in the ledger (at least 1)
    pub months_observed: usize,
}

/// A successful estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoanEstimate {
    pub avg_monthly_income: f64,
    pub avg_monthly_expense: f64,
    pub disposable: f64,
    pub max_emi: f64,
    pub loan_amount: f64,
    pub annual_interest_rate: f64,
    pub tenure_years: u32,
    pub max_emi_ratio: f64,
    pub months_observed: usize,
}

/// Result of a loan eligibility request
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoanOutcome {
    /// The ledger is empty
    NoData,
    /// Disposable income leaves no room for an EMI
    InsufficientIncome(MonthlyAverages),
    Eligible(LoanEstimate),
}

impl LoanOutcome {
    pub fn estimate(&self) -> Option<&LoanEstimate> {
        match self {
            Self::Eligible(estimate) => Some(estimate),
            _ => None,
        }
    }
}

/// Estimate loan eligibility from a ledger snapshot
pub fn loan_eligibility(
    transactions: &[Transaction],
    params: &LoanParams,
) -> FinanceResult<LoanOutcome> {
    params.validate()?;

    if transactions.is_empty() {
        return Ok(LoanOutcome::NoData);
    }

    let summary = Summary::generate(transactions);
    let months = months_observed(transactions).max(1);
    let averages = MonthlyAverages {
        avg_monthly_income: summary.total_income.to_f64() / months as f64,
        avg_monthly_expense: summary.total_expense.to_f64() / months as f64,
        disposable: 0.0,
        months_observed: months,
    };

    Ok(estimate_from_averages(averages, params))
}

/// Estimate loan eligibility from precomputed monthly averages
///
/// `disposable` is recomputed from the income and expense averages.
pub fn estimate_from_averages(averages: MonthlyAverages, params: &LoanParams) -> LoanOutcome {
    let disposable = averages.avg_monthly_income - averages.avg_monthly_expense;
    let averages = MonthlyAverages {
        disposable,
        ..averages
    };
    let max_emi = disposable * params.max_emi_ratio;

    if max_emi <= 0.0 {
        return LoanOutcome::InsufficientIncome(averages);
    }

    LoanOutcome::Eligible(LoanEstimate {
        avg_monthly_income: averages.avg_monthly_income,
        avg_monthly_expense: averages.avg_monthly_expense,
        disposable,
        max_emi,
        loan_amount: params.principal_for_emi(max_emi),
        annual_interest_rate: params.annual_interest_rate,
        tenure_years: params.tenure_years,
        max_emi_ratio: params.max_emi_ratio,
        months_observed: averages.months_observed,
    })
}
