//! Monthly DCA / SIP accumulation schedule

use serde::{Deserialize, Serialize};

use super::rows::{GrowthSchedule, ScheduleRow};
use crate::error::EngineError;

/// Inputs for a systematic-investment-plan projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipRequest {
    /// Opening balance before the first monthly contribution
    pub starting_principal: f64,

    /// Fixed amount invested every month regardless of price
    pub monthly_contribution: f64,

    /// Annual growth rate in percent, applied as rate/12 each month
    pub annual_rate_pct: f64,

    /// Years to invest; one output row per month
    pub years: u32,
}

impl SipRequest {
    fn validate(&self) -> Result<(), EngineError> {
        if self.starting_principal < 0.0 {
            return Err(EngineError::invalid("starting principal must not be negative"));
        }
        if self.monthly_contribution < 0.0 {
            return Err(EngineError::invalid("contribution must not be negative"));
        }
        if self.annual_rate_pct < 0.0 {
            return Err(EngineError::invalid("growth rate must not be negative"));
        }
        if self.years == 0 {
            return Err(EngineError::invalid("duration must be at least 1 year"));
        }
        Ok(())
    }
}

/// Run a SIP projection, emitting one row per month
///
/// `balance = balance * (1 + r/12) + monthly_contribution` each month,
/// starting from the opening principal. The interest column reports
/// cumulative growth over everything contributed so far.
pub fn sip_schedule(request: &SipRequest) -> Result<GrowthSchedule, EngineError> {
    request.validate()?;

    let rate = request.annual_rate_pct / 100.0 / 12.0;
    let months = request.years * 12;

    let mut schedule = GrowthSchedule::new();
    let mut balance = request.starting_principal;

    for month in 1..=months {
        balance = balance * (1.0 + rate) + request.monthly_contribution;

        let contributed_to_date =
            request.starting_principal + request.monthly_contribution * month as f64;
        let contribution = if month == 1 {
            request.starting_principal + request.monthly_contribution
        } else {
            request.monthly_contribution
        };

        schedule.add_row(ScheduleRow {
            period: month,
            contribution,
            interest: balance - contributed_to_date,
            ending_balance: balance,
        });
    }

    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(principal: f64, monthly: f64, rate: f64, years: u32) -> SipRequest {
        SipRequest {
            starting_principal: principal,
            monthly_contribution: monthly,
            annual_rate_pct: rate,
            years,
        }
    }

    #[test]
    fn test_one_row_per_month() {
        let schedule = sip_schedule(&request(0.0, 500.0, 7.0, 10)).unwrap();
        assert_eq!(schedule.rows.len(), 120);
        assert_eq!(schedule.rows[0].period, 1);
        assert_eq!(schedule.rows[119].period, 120);
    }

    #[test]
    fn test_zero_rate_is_linear() {
        let schedule = sip_schedule(&request(1_000.0, 250.0, 0.0, 2)).unwrap();

        for row in &schedule.rows {
            let expected = 1_000.0 + 250.0 * row.period as f64;
            assert!((row.ending_balance - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_starting_principal_grows_separably() {
        // The opening balance compounds independently of the contribution
        // stream: final(p0) = final(0) + p0 * (1 + r/12)^months
        let principal = 10_000.0;
        let rate = 6.0;
        let years = 5;

        let with_principal = sip_schedule(&request(principal, 300.0, rate, years)).unwrap();
        let without_principal = sip_schedule(&request(0.0, 300.0, rate, years)).unwrap();

        let monthly_rate = rate / 100.0 / 12.0;
        let principal_growth = principal * (1.0 + monthly_rate).powi(years as i32 * 12);

        let diff = with_principal.final_balance() - without_principal.final_balance();
        assert!(
            (diff - principal_growth).abs() < 1e-6,
            "expected separable growth {}, got {}",
            principal_growth,
            diff
        );
    }

    #[test]
    fn test_first_month_folds_in_principal() {
        let schedule = sip_schedule(&request(2_000.0, 100.0, 5.0, 1)).unwrap();
        assert!((schedule.rows[0].contribution - 2_100.0).abs() < 1e-9);
        assert!((schedule.rows[1].contribution - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(matches!(
            sip_schedule(&request(0.0, -10.0, 5.0, 1)),
            Err(EngineError::InvalidInput { .. })
        ));
        assert!(matches!(
            sip_schedule(&request(0.0, 100.0, 5.0, 0)),
            Err(EngineError::InvalidInput { .. })
        ));
    }
}
