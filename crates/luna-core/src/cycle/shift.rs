//! Thermal shift (ovulation) detection.
//!
//! Scans the series in date order for the first candidate day whose next
//! `confirm_days` readings all sit strictly above the coverline of the
//! readings preceding it, with at least one of them clearing the coverline
//! by `min_shift_celsius`. Confirming readings are the next available
//! samples, not calendar days, so missed days do not break detection.
//! Only the first shift is reported.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::baseline::{Baseline, BaselineEstimator};
use super::params::{ConfidenceWeights, CycleParams, TEMPERATURE_EPSILON};
use super::reading::{Reading, SampleSeries};

/// Outcome of ovulation detection.
///
/// When `detected` is false every other field is `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OvulationResult {
    pub detected: bool,
    /// First day of the confirmed rise
    pub date: Option<NaiveDate>,
    /// Detection confidence in `[0, 1]`
    pub confidence: Option<f64>,
    /// Coverline the rise was measured against (°C)
    pub baseline: Option<f64>,
    /// Mean of the confirming readings (°C)
    pub post_shift_temperature: Option<f64>,
}

impl OvulationResult {
    pub fn not_detected() -> Self {
        Self::default()
    }

    /// Ovulation date when one was detected.
    pub fn detected_date(&self) -> Option<NaiveDate> {
        if self.detected {
            self.date
        } else {
            None
        }
    }
}

/// Finds the first sustained post-ovulatory temperature rise.
#[derive(Debug, Clone)]
pub struct ShiftDetector {
    pub baseline: BaselineEstimator,
    pub confirm_days: usize,
    pub min_shift_celsius: f64,
    pub min_readings: usize,
    pub weights: ConfidenceWeights,
}

impl Default for ShiftDetector {
    fn default() -> Self {
        Self::from_params(&CycleParams::default())
    }
}

impl ShiftDetector {
    pub fn from_params(params: &CycleParams) -> Self {
        Self {
            baseline: BaselineEstimator::new(params.baseline_window),
            confirm_days: params.confirm_days,
            min_shift_celsius: params.min_shift_celsius,
            min_readings: params.min_readings,
            weights: params.confidence_weights.clone(),
        }
    }

    /// Detect the first confirmed shift in `series`.
    pub fn detect(&self, series: &SampleSeries) -> OvulationResult {
        let samples = series.samples();
        if samples.len() < self.min_readings {
            tracing::debug!(
                readings = samples.len(),
                required = self.min_readings,
                "too few readings for shift detection"
            );
            return OvulationResult::not_detected();
        }

        for index in 1..samples.len() {
            let end = index + self.confirm_days;
            if end > samples.len() {
                break;
            }
            let Some(baseline) = self.baseline.estimate_before(samples, index) else {
                continue;
            };
            if let Some(result) = self.confirm(&baseline, &samples[index..end]) {
                tracing::debug!(
                    date = %samples[index].date,
                    baseline = baseline.temperature,
                    confidence = result.confidence.unwrap_or_default(),
                    "thermal shift confirmed"
                );
                return result;
            }
        }

        OvulationResult::not_detected()
    }

    /// Evaluate one candidate window against its coverline.
    fn confirm(&self, baseline: &Baseline, confirming: &[Reading]) -> Option<OvulationResult> {
        let first = confirming.first()?;
        let last = confirming.last()?;

        let rises: Vec<f64> = confirming
            .iter()
            .map(|r| r.temperature - baseline.temperature)
            .collect();
        if rises.iter().any(|&rise| rise <= TEMPERATURE_EPSILON) {
            return None;
        }
        let max_rise = rises.iter().copied().fold(f64::MIN, f64::max);
        if max_rise < self.min_shift_celsius - TEMPERATURE_EPSILON {
            return None;
        }

        let span_days = (last.date - first.date).num_days() + 1;
        let post_shift =
            confirming.iter().map(|r| r.temperature).sum::<f64>() / confirming.len() as f64;

        Some(OvulationResult {
            detected: true,
            date: Some(first.date),
            confidence: Some(self.confidence(max_rise, span_days, baseline.sample_count)),
            baseline: Some(baseline.temperature),
            post_shift_temperature: Some(post_shift),
        })
    }

    /// Weighted confidence score in `[0, 1]`.
    ///
    /// * magnitude: largest rise over twice the shift floor, capped at 1
    /// * day coverage: confirming readings over their calendar span
    /// * baseline coverage: coverline samples over the baseline window
    pub fn confidence(&self, max_rise: f64, span_days: i64, baseline_samples: usize) -> f64 {
        let magnitude = (max_rise / (2.0 * self.min_shift_celsius)).clamp(0.0, 1.0);
        let day_coverage = if span_days > 0 {
            (self.confirm_days as f64 / span_days as f64).min(1.0)
        } else {
            0.0
        };
        let baseline_coverage = if self.baseline.window > 0 {
            (baseline_samples as f64 / self.baseline.window as f64).min(1.0)
        } else {
            0.0
        };

        let score = self.weights.magnitude * magnitude
            + self.weights.day_coverage * day_coverage
            + self.weights.baseline_coverage * baseline_coverage;
        score.clamp(0.0, 1.0)
    }
}
