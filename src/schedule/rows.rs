//! Output structures for accumulation schedules

use serde::{Deserialize, Serialize};

/// A single emitted period of an accumulation schedule
///
/// `period` is the year number for compound schedules and the month
/// number for SIP schedules, 1-indexed. `interest` is cumulative growth
/// since the start of the schedule, so a losing month can make it dip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub period: u32,

    /// Money paid in during this period. The opening principal is folded
    /// into the first period's figure, matching how deposit tables are
    /// conventionally displayed.
    pub contribution: f64,

    /// Cumulative interest/growth earned through the end of this period
    pub interest: f64,

    /// Balance at the end of this period
    pub ending_balance: f64,
}

/// Complete accumulation schedule
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrowthSchedule {
    pub rows: Vec<ScheduleRow>,
}

impl GrowthSchedule {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Add a schedule row
    pub fn add_row(&mut self, row: ScheduleRow) {
        self.rows.push(row);
    }

    /// Balance after the final period (0 for an empty schedule)
    pub fn final_balance(&self) -> f64 {
        self.rows.last().map(|r| r.ending_balance).unwrap_or(0.0)
    }

    /// Get summary statistics for the whole schedule
    pub fn summary(&self) -> ScheduleSummary {
        let total_contributed: f64 = self.rows.iter().map(|r| r.contribution).sum();
        let total_interest = self.rows.last().map(|r| r.interest).unwrap_or(0.0);

        ScheduleSummary {
            periods: self.rows.len() as u32,
            total_contributed,
            total_interest,
            final_balance: self.final_balance(),
        }
    }
}

/// Summary statistics for an accumulation schedule
///
/// This is the contribution/interest split the presentation layer uses
/// for its pie and stacked-bar breakdowns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub periods: u32,
    pub total_contributed: f64,
    pub total_interest: f64,
    pub final_balance: f64,
}
