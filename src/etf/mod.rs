//! ETF backtesting: price series, CSV ingestion, and the simulator

pub mod loader;
mod prices;
mod simulator;

pub use prices::{PricePoint, PriceSeries};
pub use simulator::{
    simulate, simulate_batch, BatchOutcome, ContributionMethod, SimulationRequest,
    SimulationResult,
};
