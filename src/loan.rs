//! Loan amortization with extra-payment support

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Hard cap on payoff length. A schedule that is still outstanding after
/// this many months is reported as non-convergent rather than truncated.
pub const MAX_PAYOFF_MONTHS: u32 = 600;

/// Inputs for a loan payoff projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanRequest {
    /// Outstanding balance at the start of the schedule
    pub principal: f64,

    /// Annual interest rate in percent, accrued as rate/12 each month
    pub annual_rate_pct: f64,

    /// Regular monthly payment
    pub monthly_payment: f64,

    /// Additional principal paid on top of the regular payment
    #[serde(default)]
    pub extra_payment: f64,
}

impl LoanRequest {
    fn validate(&self) -> Result<(), EngineError> {
        if self.principal <= 0.0 {
            return Err(EngineError::invalid("loan principal must be positive"));
        }
        if self.annual_rate_pct < 0.0 {
            return Err(EngineError::invalid("interest rate must not be negative"));
        }
        if self.monthly_payment <= 0.0 {
            return Err(EngineError::invalid("monthly payment must be positive"));
        }
        if self.extra_payment < 0.0 {
            return Err(EngineError::invalid("extra payment must not be negative"));
        }
        Ok(())
    }
}

/// A single month of a loan payoff schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanRow {
    pub month: u32,

    /// Interest accrued this month
    pub interest: f64,

    /// Principal retired this month, clamped so the balance never goes
    /// negative in the final month
    pub principal: f64,

    /// Balance remaining after this month's payment
    pub balance: f64,
}

/// Complete payoff schedule for an amortizing loan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanSchedule {
    pub rows: Vec<LoanRow>,
}

impl LoanSchedule {
    /// Number of months until the balance reaches zero
    pub fn months_to_payoff(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Total interest paid over the life of the loan
    pub fn total_interest(&self) -> f64 {
        self.rows.iter().map(|r| r.interest).sum()
    }

    /// Total of all payments, principal plus interest
    pub fn total_paid(&self) -> f64 {
        self.rows.iter().map(|r| r.interest + r.principal).sum()
    }
}

/// Run a loan payoff projection until the balance reaches zero
///
/// Each month accrues `balance * r` of interest, then retires
/// `payment + extra - interest` of principal. A payment that does not
/// clear the first month's interest can never amortize and fails fast;
/// a schedule still outstanding at [`MAX_PAYOFF_MONTHS`] is likewise
/// reported as [`EngineError::NonConvergent`].
pub fn loan_payoff(request: &LoanRequest) -> Result<LoanSchedule, EngineError> {
    request.validate()?;

    let rate = request.annual_rate_pct / 100.0 / 12.0;
    let payment = request.monthly_payment + request.extra_payment;

    // Interest is largest in month 1, so this check covers every month.
    if payment <= request.principal * rate {
        return Err(EngineError::NonConvergent {
            periods: 0,
            remaining: request.principal,
        });
    }

    let mut schedule = LoanSchedule { rows: Vec::new() };
    let mut balance = request.principal;
    let mut month = 0;

    while balance > 0.0 {
        month += 1;
        if month > MAX_PAYOFF_MONTHS {
            return Err(EngineError::NonConvergent {
                periods: MAX_PAYOFF_MONTHS,
                remaining: balance,
            });
        }

        let interest = balance * rate;
        let principal_paid = (payment - interest).min(balance);
        balance -= principal_paid;

        schedule.rows.push(LoanRow {
            month,
            interest,
            principal: principal_paid,
            balance,
        });
    }

    Ok(schedule)
}
