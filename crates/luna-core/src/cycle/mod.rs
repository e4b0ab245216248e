//! Cycle analysis engine.
//!
//! Turns a basal body temperature history into a detected ovulation, a
//! phase label for a given day and a predicted next period. All components
//! are pure functions of their inputs; the host owns the reading history.
//!
//! Data flow: readings -> [`SampleSeries`] -> [`ShiftDetector`] (using
//! [`BaselineEstimator`]) -> [`PhaseClassifier`] / [`PeriodPredictor`].
//! [`TrendAnalyzer`] runs independently as a display hint.

mod analyzer;
mod baseline;
mod params;
mod phase;
mod predict;
mod reading;
mod shift;
mod trend;

pub use analyzer::CycleAnalyzer;
pub use baseline::{Baseline, BaselineEstimator};
pub use params::{ConfidenceWeights, CycleParams};
pub use phase::{Phase, PhaseClassifier, PhaseResult};
pub use predict::PeriodPredictor;
pub use reading::{Reading, SampleSeries};
pub use shift::{OvulationResult, ShiftDetector};
pub use trend::{Trend, TrendAnalyzer};
