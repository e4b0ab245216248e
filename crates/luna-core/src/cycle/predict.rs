//! Next-period projection.

use chrono::{Duration, NaiveDate};

use super::params::CycleParams;
use super::shift::OvulationResult;

/// Projects the next period onset from a detected ovulation.
///
/// Without a detected ovulation there is no prediction.
#[derive(Debug, Clone)]
pub struct PeriodPredictor {
    pub luteal_length_days: i64,
}

impl Default for PeriodPredictor {
    fn default() -> Self {
        Self::from_params(&CycleParams::default())
    }
}

impl PeriodPredictor {
    pub fn from_params(params: &CycleParams) -> Self {
        Self {
            luteal_length_days: params.luteal_length_days,
        }
    }

    pub fn predict(&self, ovulation: &OvulationResult) -> Option<NaiveDate> {
        ovulation
            .detected_date()
            .and_then(|date| date.checked_add_signed(Duration::days(self.luteal_length_days)))
    }
}
