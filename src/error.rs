//! Error taxonomy shared by all calculators

use thiserror::Error;

/// Errors surfaced by the projection engines
///
/// Every variant is recoverable at the caller's boundary: the offending
/// calculation is simply not rendered, sibling calculations are unaffected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Out-of-range or nonsensical parameters, rejected before any
    /// schedule is computed
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// An iterative schedule failed to reach its terminal condition
    /// within the safety cap
    #[error("schedule did not converge after {periods} periods ({remaining:.2} outstanding)")]
    NonConvergent { periods: u32, remaining: f64 },

    /// Price history missing or too short for the requested ticker
    #[error("no usable price data for {ticker}: {reason}")]
    DataUnavailable { ticker: String, reason: String },
}

impl EngineError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            reason: reason.into(),
        }
    }
}
