//! Investment Calc - deterministic projection engine for personal-finance planning
//!
//! This library provides:
//! - Compound-interest and DCA/SIP accumulation schedules
//! - Loan amortization with extra-payment support
//! - FIRE (financial independence) timeline projection
//! - Dividend income and cumulative ROI calculators
//! - ETF performance simulation over historical price series

pub mod error;
pub mod etf;
pub mod fire;
pub mod loan;
pub mod request;
pub mod returns;
pub mod schedule;

// Re-export commonly used types
pub use error::EngineError;
pub use etf::{PriceSeries, SimulationRequest, SimulationResult};
pub use fire::{FireProjection, FireRequest};
pub use loan::{LoanRequest, LoanSchedule};
pub use request::{run, CalculationOutput, CalculationRequest};
pub use schedule::{CompoundRequest, Frequency, GrowthSchedule, ScheduleRow, SipRequest};
