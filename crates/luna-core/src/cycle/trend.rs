//! Short-window temperature direction, used only as a display hint.

use serde::{Deserialize, Serialize};

use super::params::{CycleParams, TEMPERATURE_EPSILON};
use super::reading::SampleSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
    Flat,
    Unknown,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Rising => "rising",
            Trend::Falling => "falling",
            Trend::Flat => "flat",
            Trend::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct TrendAnalyzer {
    /// Trailing readings inspected
    pub window: usize,
    /// Spread (max - min) reported as flat
    pub flat_tolerance_celsius: f64,
}

impl Default for TrendAnalyzer {
    fn default() -> Self {
        Self::from_params(&CycleParams::default())
    }
}

impl TrendAnalyzer {
    pub fn from_params(params: &CycleParams) -> Self {
        Self {
            window: params.trend_window,
            flat_tolerance_celsius: params.flat_tolerance_celsius,
        }
    }

    /// Direction over the last `window` readings of `series`.
    pub fn analyze(&self, series: &SampleSeries) -> Trend {
        let temps: Vec<f64> = series.temperatures().collect();
        let start = temps.len().saturating_sub(self.window);
        self.classify(&temps[start..])
    }

    /// Classify a short run of temperatures in date order.
    ///
    /// A flat spread wins over a direction, so equal readings are flat.
    pub fn classify(&self, temps: &[f64]) -> Trend {
        if temps.len() < 2 {
            return Trend::Unknown;
        }

        let max = temps.iter().copied().fold(f64::MIN, f64::max);
        let min = temps.iter().copied().fold(f64::MAX, f64::min);
        if max - min <= self.flat_tolerance_celsius + TEMPERATURE_EPSILON {
            return Trend::Flat;
        }

        let pairs = || temps.windows(2).map(|w| (w[0], w[1]));
        if pairs().all(|(prev, next)| next >= prev) {
            Trend::Rising
        } else if pairs().all(|(prev, next)| next <= prev) {
            Trend::Falling
        } else {
            Trend::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_few_readings_is_unknown() {
        let analyzer = TrendAnalyzer::default();
        assert_eq!(analyzer.classify(&[]), Trend::Unknown);
        assert_eq!(analyzer.classify(&[36.5]), Trend::Unknown);
    }

    #[test]
    fn classifies_directions() {
        let analyzer = TrendAnalyzer::default();
        assert_eq!(analyzer.classify(&[36.3, 36.4, 36.6]), Trend::Rising);
        assert_eq!(analyzer.classify(&[36.3, 36.4, 36.4]), Trend::Rising);
        assert_eq!(analyzer.classify(&[36.7, 36.5, 36.3]), Trend::Falling);
        assert_eq!(analyzer.classify(&[36.3, 36.6, 36.4]), Trend::Unknown);
    }

    #[test]
    fn small_spread_is_flat() {
        let analyzer = TrendAnalyzer::default();
        assert_eq!(analyzer.classify(&[36.50, 36.52, 36.55]), Trend::Flat);
        assert_eq!(analyzer.classify(&[36.5, 36.5]), Trend::Flat);
        assert_eq!(analyzer.classify(&[36.50, 36.56]), Trend::Rising);
    }

    #[test]
    fn only_the_trailing_window_counts() {
        use super::super::reading::Reading;
        use chrono::{Duration, NaiveDate};

        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let readings: Vec<_> = [37.0, 36.3, 36.4, 36.6]
            .iter()
            .enumerate()
            .map(|(i, &t)| Reading::new(t, start + Duration::days(i as i64)))
            .collect();
        let series = SampleSeries::new(&readings, &CycleParams::default()).unwrap();
        assert_eq!(TrendAnalyzer::default().analyze(&series), Trend::Rising);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Trend::Rising).unwrap(), "\"rising\"");
    }
}
