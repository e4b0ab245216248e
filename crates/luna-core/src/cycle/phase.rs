//! Cycle phase classification.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::baseline::BaselineEstimator;
use super::params::{CycleParams, TEMPERATURE_EPSILON};
use super::reading::SampleSeries;
use super::shift::OvulationResult;
use super::trend::Trend;

/// Phase label reported for "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    InsufficientData,
    PreOvulation,
    Ovulation,
    Luteal,
    PreMenstrual,
    /// A rise is underway but not yet confirmed.
    Transition,
}

impl Phase {
    pub const ALL: [Phase; 6] = [
        Phase::PreOvulation,
        Phase::Ovulation,
        Phase::Luteal,
        Phase::PreMenstrual,
        Phase::InsufficientData,
        Phase::Transition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::InsufficientData => "insufficient-data",
            Phase::PreOvulation => "pre-ovulation",
            Phase::Ovulation => "ovulation",
            Phase::Luteal => "luteal",
            Phase::PreMenstrual => "pre-menstrual",
            Phase::Transition => "transition",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::ALL
            .iter()
            .find(|p| p.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown phase: {s}"))
    }
}

/// Full phase analysis for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseResult {
    pub phase: Phase,
    /// Mean over the analysed series at full precision; 0.0 when empty
    pub average_temperature: f64,
    pub trend: Trend,
    pub ovulation: OvulationResult,
    /// Whole days from the ovulation date to today
    pub days_since_ovulation: Option<i64>,
    pub predicted_period_date: Option<NaiveDate>,
}

/// Maps today plus the ovulation outcome to a [`Phase`].
///
/// Stateless: every call derives the phase from its inputs alone.
#[derive(Debug, Clone)]
pub struct PhaseClassifier {
    pub min_readings: usize,
    pub min_readings_without_shift: usize,
    pub luteal_length_days: i64,
    pub transition_min_days: usize,
    pub baseline: BaselineEstimator,
}

impl Default for PhaseClassifier {
    fn default() -> Self {
        Self::from_params(&CycleParams::default())
    }
}

impl PhaseClassifier {
    pub fn from_params(params: &CycleParams) -> Self {
        Self {
            min_readings: params.min_readings,
            min_readings_without_shift: params.min_readings_without_shift,
            luteal_length_days: params.luteal_length_days,
            transition_min_days: params.transition_min_days,
            baseline: BaselineEstimator::new(params.baseline_window),
        }
    }

    /// Whole days between the detected ovulation and `today`.
    pub fn days_since_ovulation(ovulation: &OvulationResult, today: NaiveDate) -> Option<i64> {
        ovulation
            .detected_date()
            .map(|date| (today - date).num_days())
    }

    /// Classify `today` given the series it was detected on.
    pub fn classify(
        &self,
        series: &SampleSeries,
        ovulation: &OvulationResult,
        today: NaiveDate,
    ) -> Phase {
        if series.len() < self.min_readings {
            return Phase::InsufficientData;
        }

        match Self::days_since_ovulation(ovulation, today) {
            Some(days) => self.phase_after_ovulation(days),
            None if series.len() < self.min_readings_without_shift => Phase::InsufficientData,
            None if self.rise_underway(series) => Phase::Transition,
            None => Phase::PreOvulation,
        }
    }

    /// Phase for a day `days` after (negative: before) the ovulation date.
    pub fn phase_after_ovulation(&self, days: i64) -> Phase {
        match days {
            d if d < 0 => Phase::PreOvulation,
            0 => Phase::Ovulation,
            d if d <= self.luteal_length_days => Phase::Luteal,
            _ => Phase::PreMenstrual,
        }
    }

    /// Whether the trailing readings sit above the coverline before them.
    fn rise_underway(&self, series: &SampleSeries) -> bool {
        let samples = series.samples();
        let n = self.transition_min_days;
        if samples.len() <= n {
            return false;
        }
        let split = samples.len() - n;
        let Some(baseline) = self.baseline.estimate(&samples[..split]) else {
            return false;
        };
        samples[split..]
            .iter()
            .all(|r| r.temperature - baseline.temperature > TEMPERATURE_EPSILON)
    }
}
