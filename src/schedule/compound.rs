//! Compound-interest accumulation schedule

use serde::{Deserialize, Serialize};

use super::rows::{GrowthSchedule, ScheduleRow};
use crate::error::EngineError;

/// Compounding sub-periods per year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Annual,
    Quarterly,
    Monthly,
    Daily,
}

impl Frequency {
    /// Number of compounding sub-periods in a year
    pub fn per_year(self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
            Frequency::Daily => 365,
        }
    }

    /// Parse a raw sub-period count; anything outside the supported set
    /// is rejected at the boundary
    pub fn from_per_year(periods: u32) -> Result<Self, EngineError> {
        match periods {
            1 => Ok(Frequency::Annual),
            4 => Ok(Frequency::Quarterly),
            12 => Ok(Frequency::Monthly),
            365 => Ok(Frequency::Daily),
            other => Err(EngineError::invalid(format!(
                "unsupported compounding frequency {} (expected 1, 4, 12, or 365)",
                other
            ))),
        }
    }
}

/// Inputs for a compound-interest projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundRequest {
    /// One-time opening investment
    pub principal: f64,

    /// Contribution added over the course of each year, split evenly
    /// across compounding sub-periods
    pub annual_contribution: f64,

    /// Annual interest rate in percent (8.0 = 8%)
    pub annual_rate_pct: f64,

    /// Years to grow; one output row per year
    pub years: u32,

    pub frequency: Frequency,
}

impl CompoundRequest {
    fn validate(&self) -> Result<(), EngineError> {
        if self.principal < 0.0 {
            return Err(EngineError::invalid("principal must not be negative"));
        }
        if self.annual_contribution < 0.0 {
            return Err(EngineError::invalid("contribution must not be negative"));
        }
        if self.annual_rate_pct < 0.0 {
            return Err(EngineError::invalid("interest rate must not be negative"));
        }
        if self.years == 0 {
            return Err(EngineError::invalid("duration must be at least 1 year"));
        }
        Ok(())
    }
}

/// Run a compound-interest projection, emitting one row per year
///
/// Each year applies `frequency` sub-period updates
/// `balance = balance * (1 + r) + contribution / frequency`, then reports
/// the running balance and the cumulative interest earned so far.
pub fn compound_schedule(request: &CompoundRequest) -> Result<GrowthSchedule, EngineError> {
    request.validate()?;

    let freq = request.frequency.per_year();
    let rate = request.annual_rate_pct / 100.0 / freq as f64;
    let sub_contribution = request.annual_contribution / freq as f64;

    let mut schedule = GrowthSchedule::new();
    let mut balance = request.principal;

    for year in 1..=request.years {
        for _ in 0..freq {
            balance = balance * (1.0 + rate) + sub_contribution;
        }

        let contributed_to_date = request.principal + request.annual_contribution * year as f64;
        let contribution = if year == 1 {
            request.principal + request.annual_contribution
        } else {
            request.annual_contribution
        };

        schedule.add_row(ScheduleRow {
            period: year,
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

    fn request(principal: f64, contribution: f64, rate: f64, years: u32) -> CompoundRequest {
        CompoundRequest {
            principal,
            annual_contribution: contribution,
            annual_rate_pct: rate,
            years,
            frequency: Frequency::Annual,
        }
    }

    #[test]
    fn test_single_year_annual_compounding() {
        // 20000 * 1.08 + 12000 = 33600
        let schedule = compound_schedule(&request(20_000.0, 12_000.0, 8.0, 1)).unwrap();

        assert_eq!(schedule.rows.len(), 1);
        let row = &schedule.rows[0];
        assert_eq!(row.period, 1);
        assert!((row.contribution - 32_000.0).abs() < 1e-9);
        assert!((row.ending_balance - 33_600.0).abs() < 1e-9);
        assert!((row.interest - 1_600.0).abs() < 1e-9);
    }

    #[test]
    fn test_row_count_matches_duration() {
        let schedule = compound_schedule(&request(1_000.0, 500.0, 5.0, 30)).unwrap();
        assert_eq!(schedule.rows.len(), 30);
        for (i, row) in schedule.rows.iter().enumerate() {
            assert_eq!(row.period, i as u32 + 1);
        }
    }

    #[test]
    fn test_zero_rate_is_linear() {
        let schedule = compound_schedule(&request(10_000.0, 2_400.0, 0.0, 10)).unwrap();

        for row in &schedule.rows {
            let expected = 10_000.0 + 2_400.0 * row.period as f64;
            assert!(
                (row.ending_balance - expected).abs() < 1e-6,
                "year {}: expected {}, got {}",
                row.period,
                expected,
                row.ending_balance
            );
            assert!(row.interest.abs() < 1e-6);
        }
    }

    #[test]
    fn test_balance_monotone_for_nonnegative_inputs() {
        let mut req = request(5_000.0, 1_200.0, 6.5, 25);
        req.frequency = Frequency::Monthly;
        let schedule = compound_schedule(&req).unwrap();

        let mut prev = req.principal;
        for row in &schedule.rows {
            assert!(row.ending_balance >= prev);
            prev = row.ending_balance;
        }
    }

    #[test]
    fn test_quarterly_beats_annual() {
        let annual = compound_schedule(&request(10_000.0, 0.0, 8.0, 5)).unwrap();
        let quarterly = compound_schedule(&CompoundRequest {
            frequency: Frequency::Quarterly,
            ..request(10_000.0, 0.0, 8.0, 5)
        })
        .unwrap();

        assert!(quarterly.final_balance() > annual.final_balance());
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(matches!(
            compound_schedule(&request(-1.0, 0.0, 5.0, 10)),
            Err(EngineError::InvalidInput { .. })
        ));
        assert!(matches!(
            compound_schedule(&request(1_000.0, 0.0, 5.0, 0)),
            Err(EngineError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_frequency_from_raw_period_count() {
        assert_eq!(Frequency::from_per_year(12).unwrap(), Frequency::Monthly);
        assert_eq!(Frequency::from_per_year(365).unwrap(), Frequency::Daily);
        assert!(matches!(
            Frequency::from_per_year(52),
            Err(EngineError::InvalidInput { .. })
        ));
    }
}
