//! Point calculators for dividend income and cumulative return

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// How often a position pays its dividend
///
/// Informational only: payout timing does not change the annual or
/// monthly income figures, which assume the stated yield accrues evenly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayoutFrequency {
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
}

impl Default for PayoutFrequency {
    fn default() -> Self {
        PayoutFrequency::Quarterly
    }
}

/// Inputs for a dividend income estimate
///
/// `payout_frequency` and `drip` are carried through for display only.
/// Reinvestment compounding is not modeled: with `drip` set the income
/// figures are unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DividendRequest {
    /// Invested amount
    pub amount: f64,

    /// Annual dividend yield in percent
    pub yield_pct: f64,

    #[serde(default)]
    pub payout_frequency: PayoutFrequency,

    #[serde(default)]
    pub drip: bool,
}

impl DividendRequest {
    /// Compute the income estimate for this request
    pub fn income(&self) -> Result<DividendIncome, EngineError> {
        dividend_income(self.amount, self.yield_pct)
    }
}

/// Projected dividend income at the stated yield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DividendIncome {
    pub annual: f64,
    pub monthly: f64,
}

/// Annual and monthly income from a position's dividend yield
pub fn dividend_income(amount: f64, yield_pct: f64) -> Result<DividendIncome, EngineError> {
    if amount < 0.0 {
        return Err(EngineError::invalid("invested amount must not be negative"));
    }
    if yield_pct < 0.0 {
        return Err(EngineError::invalid("dividend yield must not be negative"));
    }

    let annual = amount * yield_pct / 100.0;
    Ok(DividendIncome {
        annual,
        monthly: annual / 12.0,
    })
}

/// Inputs for a return-on-investment calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiRequest {
    pub initial: f64,
    pub final_value: f64,

    /// Holding period in years, echoed back for display. The ROI figure
    /// is cumulative over the whole period, not annualized.
    #[serde(default)]
    pub holding_years: f64,
}

/// Cumulative profit and return over a holding period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiSummary {
    pub profit: f64,
    pub roi_pct: f64,
    pub holding_years: f64,
}

/// Cumulative return on an investment
///
/// Reports `(final - initial)` and that profit as a percentage of the
/// initial stake. Deliberately not annualized by the holding period.
pub fn roi(initial: f64, final_value: f64, holding_years: f64) -> Result<RoiSummary, EngineError> {
    if initial <= 0.0 {
        return Err(EngineError::invalid("initial investment must be positive"));
    }
    if holding_years < 0.0 {
        return Err(EngineError::invalid("holding period must not be negative"));
    }

    let profit = final_value - initial;
    Ok(RoiSummary {
        profit,
        roi_pct: profit / initial * 100.0,
        holding_years,
    })
}
