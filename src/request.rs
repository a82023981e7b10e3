//! Explicit request/response layer over the calculators
//!
//! Every calculation is a single validated request run to completion;
//! there is no cross-request state. The JSON tagging matches what the
//! serverless boundary accepts.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::etf::{self, PriceSeries, SimulationRequest, SimulationResult};
use crate::fire::{fire_projection, FireProjection, FireRequest};
use crate::loan::{loan_payoff, LoanRequest, LoanSchedule};
use crate::returns::{roi, DividendIncome, DividendRequest, RoiRequest, RoiSummary};
use crate::schedule::{compound_schedule, sip_schedule, CompoundRequest, GrowthSchedule, SipRequest};

/// One calculation, tagged by kind
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "calculation", rename_all = "snake_case")]
pub enum CalculationRequest {
    Compound(CompoundRequest),
    Sip(SipRequest),
    Loan(LoanRequest),
    Fire(FireRequest),
    Dividend(DividendRequest),
    Roi(RoiRequest),
    /// ETF backtest over externally resolved price series
    Etf {
        series: Vec<PriceSeries>,
        params: SimulationRequest,
    },
}

/// Result of a dispatched calculation
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalculationOutput {
    Schedule(GrowthSchedule),
    Loan(LoanSchedule),
    Fire(FireProjection),
    Dividend(DividendIncome),
    Roi(RoiSummary),
    Etf { outcomes: Vec<TickerOutcome> },
}

/// Per-ticker batch result with the error flattened for serialization
#[derive(Debug, Clone, Serialize)]
pub struct TickerOutcome {
    pub ticker: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<SimulationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Run a calculation request to completion
///
/// ETF batches never fail as a whole: per-ticker errors are captured in
/// their [`TickerOutcome`] and sibling tickers still compute, in input
/// order.
pub fn run(request: &CalculationRequest) -> Result<CalculationOutput, EngineError> {
    match request {
        CalculationRequest::Compound(req) => Ok(CalculationOutput::Schedule(compound_schedule(req)?)),
        CalculationRequest::Sip(req) => Ok(CalculationOutput::Schedule(sip_schedule(req)?)),
        CalculationRequest::Loan(req) => Ok(CalculationOutput::Loan(loan_payoff(req)?)),
        CalculationRequest::Fire(req) => Ok(CalculationOutput::Fire(fire_projection(req)?)),
        CalculationRequest::Dividend(req) => Ok(CalculationOutput::Dividend(req.income()?)),
        CalculationRequest::Roi(req) => Ok(CalculationOutput::Roi(roi(
            req.initial,
            req.final_value,
            req.holding_years,
        )?)),
        CalculationRequest::Etf { series, params } => {
            let outcomes = etf::simulate_batch(series, params)
                .into_iter()
                .map(|outcome| match outcome.result {
                    Ok(result) => TickerOutcome {
                        ticker: outcome.ticker,
                        result: Some(result),
                        error: None,
                    },
                    Err(err) => TickerOutcome {
                        ticker: outcome.ticker,
                        result: None,
                        error: Some(err.to_string()),
                    },
                })
                .collect();
            Ok(CalculationOutput::Etf { outcomes })
        }
    }
}
