//! Tunable constants of the cycle model.
//!
//! Every threshold the engine uses lives here so hosts can persist and
//! override them through the `[analysis]` section of `config.toml`.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tolerance for temperature comparisons on decimal inputs.
pub(crate) const TEMPERATURE_EPSILON: f64 = 1e-9;

/// Weights of the three ovulation confidence components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceWeights {
    /// Size of the largest rise relative to the shift floor.
    #[serde(default = "default_magnitude_weight")]
    pub magnitude: f64,
    /// How densely the confirming readings cover their calendar span.
    #[serde(default = "default_day_coverage_weight")]
    pub day_coverage: f64,
    /// How many baseline readings were available.
    #[serde(default = "default_baseline_coverage_weight")]
    pub baseline_coverage: f64,
}

/// Model parameters for baseline, shift, phase and trend analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleParams {
    /// Lowest plausible basal body temperature (°C).
    #[serde(default = "default_min_plausible")]
    pub min_plausible_celsius: f64,
    /// Highest plausible basal body temperature (°C).
    #[serde(default = "default_max_plausible")]
    pub max_plausible_celsius: f64,
    /// Readings preceding a candidate day that form the coverline.
    #[serde(default = "default_baseline_window")]
    pub baseline_window: usize,
    /// Readings that must sit above the coverline to confirm a shift.
    #[serde(default = "default_confirm_days")]
    pub confirm_days: usize,
    /// Minimum rise over the coverline on at least one confirming day (°C).
    #[serde(default = "default_min_shift")]
    pub min_shift_celsius: f64,
    /// Below this many readings nothing is detected.
    #[serde(default = "default_min_readings")]
    pub min_readings: usize,
    /// Below this many readings, with no shift, the phase is undetermined.
    #[serde(default = "default_min_readings_without_shift")]
    pub min_readings_without_shift: usize,
    /// Assumed length of the luteal phase; also the predictor's offset.
    #[serde(default = "default_luteal_length")]
    pub luteal_length_days: i64,
    /// Trailing elevated readings that mark an unconfirmed rise.
    #[serde(default = "default_transition_min_days")]
    pub transition_min_days: usize,
    /// Readings inspected by the trend hint.
    #[serde(default = "default_trend_window")]
    pub trend_window: usize,
    /// Spread under which the trend is reported flat (°C).
    #[serde(default = "default_flat_tolerance")]
    pub flat_tolerance_celsius: f64,
    #[serde(default)]
    pub confidence_weights: ConfidenceWeights,
}

fn default_min_plausible() -> f64 {
    35.0
}
fn default_max_plausible() -> f64 {
    39.0
}
fn default_baseline_window() -> usize {
    6
}
fn default_confirm_days() -> usize {
    3
}
fn default_min_shift() -> f64 {
    0.2
}
fn default_min_readings() -> usize {
    4
}
fn default_min_readings_without_shift() -> usize {
    6
}
fn default_luteal_length() -> i64 {
    14
}
fn default_transition_min_days() -> usize {
    2
}
fn default_trend_window() -> usize {
    3
}
fn default_flat_tolerance() -> f64 {
    0.05
}
fn default_magnitude_weight() -> f64 {
    0.5
}
fn default_day_coverage_weight() -> f64 {
    0.3
}
fn default_baseline_coverage_weight() -> f64 {
    0.2
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            magnitude: default_magnitude_weight(),
            day_coverage: default_day_coverage_weight(),
            baseline_coverage: default_baseline_coverage_weight(),
        }
    }
}

impl Default for CycleParams {
    fn default() -> Self {
        Self {
            min_plausible_celsius: default_min_plausible(),
            max_plausible_celsius: default_max_plausible(),
            baseline_window: default_baseline_window(),
            confirm_days: default_confirm_days(),
            min_shift_celsius: default_min_shift(),
            min_readings: default_min_readings(),
            min_readings_without_shift: default_min_readings_without_shift(),
            luteal_length_days: default_luteal_length(),
            transition_min_days: default_transition_min_days(),
            trend_window: default_trend_window(),
            flat_tolerance_celsius: default_flat_tolerance(),
            confidence_weights: ConfidenceWeights::default(),
        }
    }
}

impl CycleParams {
    /// Whether `temperature` is finite and inside the plausible range.
    pub fn is_plausible(&self, temperature: f64) -> bool {
        temperature.is_finite()
            && temperature >= self.min_plausible_celsius
            && temperature <= self.max_plausible_celsius
    }

    /// Check the parameters are mutually consistent.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
            ConfigError::InvalidValue {
                key: format!("analysis.{key}"),
                message: message.into(),
            }
        }

        if !(self.min_plausible_celsius.is_finite() && self.max_plausible_celsius.is_finite())
            || self.min_plausible_celsius >= self.max_plausible_celsius
        {
            return Err(invalid(
                "min_plausible_celsius",
                format!(
                    "plausible range {}..={} is empty",
                    self.min_plausible_celsius, self.max_plausible_celsius
                ),
            ));
        }
        if self.baseline_window == 0 {
            return Err(invalid("baseline_window", "must be at least 1"));
        }
        if self.confirm_days == 0 {
            return Err(invalid("confirm_days", "must be at least 1"));
        }
        if !(self.min_shift_celsius.is_finite() && self.min_shift_celsius > 0.0) {
            return Err(invalid("min_shift_celsius", "must be a positive number"));
        }
        if self.min_readings <= self.confirm_days {
            return Err(invalid(
                "min_readings",
                format!("must exceed confirm_days ({})", self.confirm_days),
            ));
        }
        if self.min_readings_without_shift < self.min_readings {
            return Err(invalid(
                "min_readings_without_shift",
                format!("must be at least min_readings ({})", self.min_readings),
            ));
        }
        if self.luteal_length_days <= 0 {
            return Err(invalid("luteal_length_days", "must be positive"));
        }
        if self.transition_min_days == 0 {
            return Err(invalid("transition_min_days", "must be at least 1"));
        }
        if self.trend_window < 2 {
            return Err(invalid("trend_window", "must be at least 2"));
        }
        if !(self.flat_tolerance_celsius.is_finite() && self.flat_tolerance_celsius >= 0.0) {
            return Err(invalid("flat_tolerance_celsius", "must be non-negative"));
        }

        let w = &self.confidence_weights;
        if [w.magnitude, w.day_coverage, w.baseline_coverage]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(invalid("confidence_weights", "weights must be non-negative"));
        }
        let sum = w.magnitude + w.day_coverage + w.baseline_coverage;
        if (sum - 1.0).abs() > 1e-6 {
            return Err(invalid(
                "confidence_weights",
                format!("weights must sum to 1.0, got {sum}"),
            ));
        }
        Ok(())
    }
}
