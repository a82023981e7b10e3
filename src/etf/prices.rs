//! Historical price series consumed by the simulator

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// One monthly closing price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// A ticker's monthly closing-price history, ascending by date
///
/// The series is supplied by an external price provider, which owns
/// retries, caching, and gap filling. [`PriceSeries::validate`] checks
/// the ordering and positivity invariants at the engine boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    pub ticker: String,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(ticker: impl Into<String>, points: Vec<PricePoint>) -> Self {
        Self {
            ticker: ticker.into(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Check the provider contract: dates strictly ascending, every
    /// close strictly positive. An empty series passes; the simulator
    /// reports it as data-unavailable instead.
    pub fn validate(&self) -> Result<(), EngineError> {
        for pair in self.points.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(EngineError::invalid(format!(
                    "{}: price series is not ascending at {}",
                    self.ticker, pair[1].date
                )));
            }
        }
        if let Some(bad) = self.points.iter().find(|p| p.close <= 0.0) {
            return Err(EngineError::invalid(format!(
                "{}: non-positive close {} on {}",
                self.ticker, bad.close, bad.date
            )));
        }
        Ok(())
    }

    /// The most recent `months` points, or None if the history is too
    /// short
    pub fn last_window(&self, months: usize) -> Option<&[PricePoint]> {
        if months == 0 || self.points.len() < months {
            None
        } else {
            Some(&self.points[self.points.len() - months..])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(ymd: (i32, u32, u32), close: f64) -> PricePoint {
        PricePoint {
            date: NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap(),
            close,
        }
    }

    fn series(closes: &[f64]) -> PriceSeries {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| point((2024, i as u32 + 1, 1), close))
            .collect();
        PriceSeries::new("TEST", points)
    }

    #[test]
    fn test_ascending_positive_series_validates() {
        assert!(series(&[100.0, 110.0, 121.0]).validate().is_ok());
        assert!(series(&[]).validate().is_ok());
    }

    #[test]
    fn test_descending_dates_rejected() {
        let s = PriceSeries::new(
            "TEST",
            vec![point((2024, 2, 1), 100.0), point((2024, 1, 1), 110.0)],
        );
        assert!(matches!(s.validate(), Err(EngineError::InvalidInput { .. })));
    }

    #[test]
    fn test_non_positive_close_rejected() {
        let s = series(&[100.0, 0.0, 121.0]);
        assert!(matches!(s.validate(), Err(EngineError::InvalidInput { .. })));
    }

    #[test]
    fn test_last_window() {
        let s = series(&[100.0, 110.0, 121.0, 133.1]);
        let window = s.last_window(2).unwrap();
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].close, 121.0);
        assert_eq!(window[1].close, 133.1);

        assert!(s.last_window(5).is_none());
        assert!(s.last_window(0).is_none());
    }
}
