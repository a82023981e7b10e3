//! ETF performance simulation over historical price series

use serde::{Deserialize, Serialize};

use super::prices::PriceSeries;
use crate::error::EngineError;

/// How the invested amount enters the market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionMethod {
    /// The full amount buys in at the first month's close
    LumpSum,
    /// The amount is split into equal monthly tranches
    MonthlyDca,
}

/// Parameters for an ETF backtest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Total amount to invest over the simulation
    pub total_amount: f64,

    pub method: ContributionMethod,

    /// Length of the backtest window; the most recent `duration_months`
    /// closes of the series are used
    pub duration_months: u32,

    /// Dividend reinvestment flag, accepted as configuration but with no
    /// effect on the share math: the closing-price series carries no
    /// dividend stream to reinvest.
    #[serde(default)]
    pub drip: bool,
}

impl SimulationRequest {
    fn validate(&self) -> Result<(), EngineError> {
        if self.total_amount <= 0.0 {
            return Err(EngineError::invalid("invested amount must be positive"));
        }
        if self.duration_months == 0 {
            return Err(EngineError::invalid("duration must be at least 1 month"));
        }
        Ok(())
    }
}

/// Outcome of a single-ticker backtest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub ticker: String,
    pub invested: f64,
    pub final_value: f64,
    pub profit: f64,
    pub roi_pct: f64,
}

/// Simulate one ticker against its price history
///
/// A series with fewer than `duration_months` closes is reported as
/// [`EngineError::DataUnavailable`] so a multi-ticker batch can keep
/// going with its other tickers.
pub fn simulate(
    series: &PriceSeries,
    request: &SimulationRequest,
) -> Result<SimulationResult, EngineError> {
    request.validate()?;
    series.validate()?;

    let months = request.duration_months as usize;
    let window = series.last_window(months).ok_or_else(|| EngineError::DataUnavailable {
        ticker: series.ticker.clone(),
        reason: format!(
            "{} monthly closes required, {} available",
            months,
            series.len()
        ),
    })?;

    let shares: f64 = match request.method {
        ContributionMethod::LumpSum => request.total_amount / window[0].close,
        ContributionMethod::MonthlyDca => {
            let monthly = request.total_amount / months as f64;
            window.iter().map(|p| monthly / p.close).sum()
        }
    };

    let final_value = shares * window[window.len() - 1].close;
    let profit = final_value - request.total_amount;

    Ok(SimulationResult {
        ticker: series.ticker.clone(),
        invested: request.total_amount,
        final_value,
        profit,
        roi_pct: profit / request.total_amount * 100.0,
    })
}

/// Per-ticker outcome of a batch simulation
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub ticker: String,
    pub result: Result<SimulationResult, EngineError>,
}

/// Simulate many tickers independently
///
/// Outcomes are returned in input order; a ticker whose data is missing
/// or invalid carries its error without aborting the siblings.
pub fn simulate_batch(series_list: &[PriceSeries], request: &SimulationRequest) -> Vec<BatchOutcome> {
    series_list
        .iter()
        .map(|series| BatchOutcome {
            ticker: series.ticker.clone(),
            result: simulate(series, request),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::etf::prices::PricePoint;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn series(ticker: &str, closes: &[f64]) -> PriceSeries {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: NaiveDate::from_ymd_opt(2024, i as u32 + 1, 1).unwrap(),
                close,
            })
            .collect();
        PriceSeries::new(ticker, points)
    }

    fn request(amount: f64, method: ContributionMethod, months: u32) -> SimulationRequest {
        SimulationRequest {
            total_amount: amount,
            method,
            duration_months: months,
            drip: false,
        }
    }

    #[test]
    fn test_lump_sum_concrete() {
        // 1000 at a close of 100 buys 10 shares, worth 1210 at the end
        let s = series("VTI", &[100.0, 110.0, 121.0]);
        let result = simulate(&s, &request(1_000.0, ContributionMethod::LumpSum, 3)).unwrap();

        assert_relative_eq!(result.final_value, 1_210.0);
        assert_relative_eq!(result.profit, 210.0);
        assert_relative_eq!(result.roi_pct, 21.0);
    }

    #[test]
    fn test_monthly_dca_accumulates_at_each_close() {
        let s = series("VTI", &[100.0, 110.0, 121.0]);
        let result = simulate(&s, &request(1_000.0, ContributionMethod::MonthlyDca, 3)).unwrap();

        let monthly = 1_000.0 / 3.0;
        let shares = monthly / 100.0 + monthly / 110.0 + monthly / 121.0;
        assert_relative_eq!(result.final_value, shares * 121.0, max_relative = 1e-12);
    }

    #[test]
    fn test_flat_prices_break_even() {
        let s = series("FLAT", &[50.0, 50.0, 50.0, 50.0]);
        for method in [ContributionMethod::LumpSum, ContributionMethod::MonthlyDca] {
            let result = simulate(&s, &request(2_000.0, method, 4)).unwrap();
            assert_relative_eq!(result.profit, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_short_history_is_data_unavailable() {
        let s = series("NEW", &[100.0, 101.0]);
        let err = simulate(&s, &request(1_000.0, ContributionMethod::LumpSum, 12)).unwrap_err();
        assert!(matches!(err, EngineError::DataUnavailable { .. }));

        let empty = series("NONE", &[]);
        let err = simulate(&empty, &request(1_000.0, ContributionMethod::LumpSum, 1)).unwrap_err();
        assert!(matches!(err, EngineError::DataUnavailable { .. }));
    }

    #[test]
    fn test_drip_flag_does_not_change_result() {
        let s = series("VTI", &[100.0, 110.0, 121.0]);
        let base = simulate(&s, &request(1_000.0, ContributionMethod::LumpSum, 3)).unwrap();
        let with_drip = simulate(
            &s,
            &SimulationRequest {
                drip: true,
                ..request(1_000.0, ContributionMethod::LumpSum, 3)
            },
        )
        .unwrap();

        assert_relative_eq!(base.final_value, with_drip.final_value);
    }

    #[test]
    fn test_batch_keeps_order_and_isolates_failures() {
        let list = vec![
            series("AAA", &[100.0, 110.0, 121.0]),
            series("BBB", &[]),
            series("CCC", &[200.0, 190.0, 180.0]),
        ];
        let outcomes = simulate_batch(&list, &request(1_000.0, ContributionMethod::LumpSum, 3));

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].ticker, "AAA");
        assert!(outcomes[0].result.is_ok());
        assert_eq!(outcomes[1].ticker, "BBB");
        assert!(matches!(
            outcomes[1].result,
            Err(EngineError::DataUnavailable { .. })
        ));
        assert_eq!(outcomes[2].ticker, "CCC");
        let ccc = outcomes[2].result.as_ref().unwrap();
        assert!(ccc.profit < 0.0);
    }
}
