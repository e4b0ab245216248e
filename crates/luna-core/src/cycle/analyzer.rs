//! Composition of the cycle components behind two entry points.

use chrono::NaiveDate;

use super::params::CycleParams;
use super::phase::{PhaseClassifier, PhaseResult};
use super::predict::PeriodPredictor;
use super::reading::{Reading, SampleSeries};
use super::shift::{OvulationResult, ShiftDetector};
use super::trend::TrendAnalyzer;
use crate::error::{AnalysisError, ConfigError};

/// Stateless cycle analysis engine.
///
/// Holds only validated parameters; every call works on the snapshot of
/// readings it is given, so one analyzer can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct CycleAnalyzer {
    params: CycleParams,
    detector: ShiftDetector,
    classifier: PhaseClassifier,
    predictor: PeriodPredictor,
    trend: TrendAnalyzer,
}

impl Default for CycleAnalyzer {
    fn default() -> Self {
        Self::build(CycleParams::default())
    }
}

impl CycleAnalyzer {
    /// Create an analyzer with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with custom parameters.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] if the parameters are inconsistent.
    pub fn with_params(params: CycleParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self::build(params))
    }

    fn build(params: CycleParams) -> Self {
        Self {
            detector: ShiftDetector::from_params(&params),
            classifier: PhaseClassifier::from_params(&params),
            predictor: PeriodPredictor::from_params(&params),
            trend: TrendAnalyzer::from_params(&params),
            params,
        }
    }

    pub fn params(&self) -> &CycleParams {
        &self.params
    }

    pub fn classifier(&self) -> &PhaseClassifier {
        &self.classifier
    }

    /// Normalize readings into a series, rejecting implausible values.
    ///
    /// # Errors
    /// Returns [`AnalysisError::InvalidReading`] for the first bad reading.
    pub fn series(&self, readings: &[Reading]) -> Result<SampleSeries, AnalysisError> {
        SampleSeries::new(readings, &self.params)
    }

    /// Detect ovulation in an unordered reading history.
    ///
    /// # Errors
    /// Returns [`AnalysisError::InvalidReading`] for the first bad reading.
    pub fn detect_ovulation(&self, readings: &[Reading]) -> Result<OvulationResult, AnalysisError> {
        Ok(self.detect_ovulation_in(&self.series(readings)?))
    }

    pub fn detect_ovulation_in(&self, series: &SampleSeries) -> OvulationResult {
        self.detector.detect(series)
    }

    /// Classify the cycle phase on `today` from an unordered history.
    ///
    /// # Errors
    /// Returns [`AnalysisError::InvalidReading`] for the first bad reading.
    pub fn detect_current_phase(
        &self,
        readings: &[Reading],
        today: NaiveDate,
    ) -> Result<PhaseResult, AnalysisError> {
        Ok(self.detect_current_phase_in(&self.series(readings)?, today))
    }

    /// Classify the cycle phase on `today`.
    ///
    /// Ovulation is detected over the whole series, so a shift confirmed by
    /// readings after `today` still dates the ovulation. Trend and average
    /// only look at readings up to `today`.
    pub fn detect_current_phase_in(&self, series: &SampleSeries, today: NaiveDate) -> PhaseResult {
        let ovulation = self.detector.detect(series);
        let phase = self.classifier.classify(series, &ovulation, today);
        let days_since_ovulation = PhaseClassifier::days_since_ovulation(&ovulation, today);
        let predicted_period_date = self.predictor.predict(&ovulation);
        let as_of = series.up_to(today);

        tracing::debug!(
            %today,
            readings = series.len(),
            %phase,
            detected = ovulation.detected,
            "phase classified"
        );

        PhaseResult {
            phase,
            average_temperature: as_of.mean_temperature().unwrap_or(0.0),
            trend: self.trend.analyze(&as_of),
            ovulation,
            days_since_ovulation,
            predicted_period_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::phase::Phase;
    use crate::cycle::trend::Trend;
    use chrono::Duration;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn readings(temps: &[f64]) -> Vec<Reading> {
        temps
            .iter()
            .enumerate()
            .map(|(i, &t)| Reading::new(t, start() + Duration::days(i as i64)))
            .collect()
    }

    #[test]
    fn rejects_invalid_params() {
        let params = CycleParams {
            baseline_window: 0,
            ..CycleParams::default()
        };
        assert!(CycleAnalyzer::with_params(params).is_err());
    }

    #[test]
    fn invalid_reading_surfaces_as_error() {
        let analyzer = CycleAnalyzer::new();
        let mut r = readings(&[36.3, 36.4, 36.3, 36.4]);
        r.push(Reading::new(45.0, start() + Duration::days(10)));
        assert!(analyzer.detect_ovulation(&r).is_err());
        assert!(analyzer.detect_current_phase(&r, start()).is_err());
    }

    #[test]
    fn empty_history_degrades_gracefully() {
        let result = CycleAnalyzer::new()
            .detect_current_phase(&[], start())
            .unwrap();
        assert_eq!(result.phase, Phase::InsufficientData);
        assert_eq!(result.trend, Trend::Unknown);
        assert_eq!(result.average_temperature, 0.0);
        assert!(!result.ovulation.detected);
        assert_eq!(result.days_since_ovulation, None);
        assert_eq!(result.predicted_period_date, None);
    }

    #[test]
    fn later_readings_still_date_the_ovulation() {
        let analyzer = CycleAnalyzer::new();
        let r = readings(&[36.3, 36.3, 36.3, 36.3, 36.3, 36.3, 36.8, 36.8, 36.8]);
        let before_rise = start() + Duration::days(5);
        let result = analyzer.detect_current_phase(&r, before_rise).unwrap();
        assert!(result.ovulation.detected);
        assert_eq!(result.days_since_ovulation, Some(-1));
        assert_eq!(result.phase, Phase::PreOvulation);
        assert_eq!(result.trend, Trend::Flat);

        let on_rise = analyzer
            .detect_current_phase(&r, start() + Duration::days(6))
            .unwrap();
        assert_eq!(on_rise.phase, Phase::Ovulation);
        assert_eq!(on_rise.days_since_ovulation, Some(0));
        assert_eq!(on_rise.trend, Trend::Rising);

        let after_rise = start() + Duration::days(10);
        let result = analyzer.detect_current_phase(&r, after_rise).unwrap();
        assert!(result.ovulation.detected);
        assert_eq!(result.days_since_ovulation, Some(4));
        assert_eq!(result.phase, Phase::Luteal);
        assert_eq!(
            result.predicted_period_date,
            Some(start() + Duration::days(20))
        );
    }

    #[test]
    fn custom_luteal_length_moves_boundary() {
        let params = CycleParams {
            luteal_length_days: 10,
            ..CycleParams::default()
        };
        let analyzer = CycleAnalyzer::with_params(params).unwrap();
        let r = readings(&[36.3, 36.3, 36.3, 36.3, 36.3, 36.3, 36.8, 36.8, 36.8]);
        let ov = start() + Duration::days(6);
        let result = analyzer
            .detect_current_phase(&r, ov + Duration::days(11))
            .unwrap();
        assert_eq!(result.phase, Phase::PreMenstrual);
        assert_eq!(result.predicted_period_date, Some(ov + Duration::days(10)));
    }
}
