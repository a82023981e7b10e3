//! Financial-independence (FIRE) timeline projection

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Hard cap on the projected horizon. With a negative return assumption
/// the balance can plateau below the target; reaching this cap is
/// reported as non-convergent instead of looping.
pub const MAX_PROJECTION_YEARS: u32 = 200;

/// Inputs for a FIRE projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FireRequest {
    pub annual_income: f64,
    pub annual_expenses: f64,

    /// Assumed annual return on invested savings, in percent. May be
    /// negative.
    pub annual_return_pct: f64,

    /// Safe withdrawal rate in percent; the target net worth is
    /// `expenses / (rate / 100)`
    pub withdrawal_rate_pct: f64,
}

impl FireRequest {
    fn validate(&self) -> Result<(), EngineError> {
        if self.annual_income <= 0.0 {
            return Err(EngineError::invalid("income must be positive"));
        }
        if self.annual_expenses < 0.0 {
            return Err(EngineError::invalid("expenses must not be negative"));
        }
        if self.annual_expenses >= self.annual_income {
            return Err(EngineError::invalid(
                "expenses meet or exceed income, so the savings rate is not positive \
                 and the target can never be reached",
            ));
        }
        if self.withdrawal_rate_pct <= 0.0 {
            return Err(EngineError::invalid("withdrawal rate must be positive"));
        }
        Ok(())
    }
}

/// End-of-year savings balance during the accumulation phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FireRow {
    pub year: u32,
    pub savings: f64,
}

/// Complete FIRE projection
///
/// Row 0 is the starting balance; the final row is the first year the
/// balance reaches the target net worth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FireProjection {
    pub rows: Vec<FireRow>,

    /// Net worth needed to sustain expenses at the withdrawal rate
    pub target_net_worth: f64,

    /// Fraction of income saved each year
    pub savings_rate: f64,
}

impl FireProjection {
    /// Years until the target is reached
    pub fn years_to_independence(&self) -> u32 {
        self.rows.last().map(|r| r.year).unwrap_or(0)
    }
}

/// Project annual savings growth until financial independence
///
/// Savings start at zero and each year grow by the assumed return plus
/// one year's savings (`income - expenses`). The schedule ends the first
/// year the balance reaches `expenses / (withdrawal_rate / 100)`.
pub fn fire_projection(request: &FireRequest) -> Result<FireProjection, EngineError> {
    request.validate()?;

    let target = request.annual_expenses / (request.withdrawal_rate_pct / 100.0);
    let savings_rate = (request.annual_income - request.annual_expenses) / request.annual_income;
    let annual_contribution = request.annual_income * savings_rate;
    let rate = request.annual_return_pct / 100.0;

    let mut rows = vec![FireRow {
        year: 0,
        savings: 0.0,
    }];
    let mut balance = 0.0;
    let mut year = 0;

    while balance < target {
        year += 1;
        if year > MAX_PROJECTION_YEARS {
            return Err(EngineError::NonConvergent {
                periods: MAX_PROJECTION_YEARS,
                remaining: target - balance,
            });
        }

        balance = balance * (1.0 + rate) + annual_contribution;
        rows.push(FireRow {
            year,
            savings: balance,
        });
    }

    Ok(FireProjection {
        rows,
        target_net_worth: target,
        savings_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(income: f64, expenses: f64, ret: f64, withdrawal: f64) -> FireRequest {
        FireRequest {
            annual_income: income,
            annual_expenses: expenses,
            annual_return_pct: ret,
            withdrawal_rate_pct: withdrawal,
        }
    }

    #[test]
    fn test_target_follows_withdrawal_rate() {
        let projection = fire_projection(&request(100_000.0, 40_000.0, 7.0, 4.0)).unwrap();
        assert!((projection.target_net_worth - 1_000_000.0).abs() < 1e-6);
        assert!((projection.savings_rate - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_terminates_first_year_at_or_above_target() {
        let projection = fire_projection(&request(100_000.0, 40_000.0, 7.0, 4.0)).unwrap();

        let rows = &projection.rows;
        assert_eq!(rows[0].year, 0);
        assert_eq!(rows[0].savings, 0.0);

        let last = rows.last().unwrap();
        assert!(last.savings >= projection.target_net_worth);
        // The year before must still be short of the target
        let penultimate = &rows[rows.len() - 2];
        assert!(penultimate.savings < projection.target_net_worth);
    }

    #[test]
    fn test_expenses_above_income_fail_fast() {
        let err = fire_projection(&request(40_000.0, 50_000.0, 7.0, 4.0)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { .. }));
    }

    #[test]
    fn test_zero_expenses_already_independent() {
        let projection = fire_projection(&request(80_000.0, 0.0, 7.0, 4.0)).unwrap();
        assert_eq!(projection.years_to_independence(), 0);
        assert_eq!(projection.rows.len(), 1);
    }

    #[test]
    fn test_negative_return_plateau_is_non_convergent() {
        // With -50% returns the balance settles near one year's savings,
        // far below the million-dollar target.
        let err = fire_projection(&request(100_000.0, 40_000.0, -50.0, 4.0)).unwrap_err();
        assert!(matches!(err, EngineError::NonConvergent { .. }));
    }

    #[test]
    fn test_higher_return_reaches_target_sooner() {
        let slow = fire_projection(&request(90_000.0, 45_000.0, 3.0, 4.0)).unwrap();
        let fast = fire_projection(&request(90_000.0, 45_000.0, 8.0, 4.0)).unwrap();
        assert!(fast.years_to_independence() < slow.years_to_independence());
    }
}
