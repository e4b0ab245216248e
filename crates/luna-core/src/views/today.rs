use chrono::NaiveDate;
use serde::Serialize;

use super::round_to;
use crate::cycle::{CycleAnalyzer, OvulationResult, Phase, SampleSeries, Trend};
use crate::tips;

/// Dashboard summary for a single day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodaySummary {
    pub date: NaiveDate,
    /// Reading logged on `date`, if any
    pub temperature: Option<f64>,
    pub has_reading: bool,
    pub phase: Phase,
    pub phase_name: String,
    pub description: String,
    pub trend: Trend,
    /// Mean of readings up to `date`, two decimals
    pub average_temperature: f64,
    pub ovulation: OvulationResult,
    pub predicted_period_date: Option<NaiveDate>,
    pub days_since_ovulation: Option<i64>,
    pub readings_count: usize,
}

impl TodaySummary {
    pub fn build(series: &SampleSeries, analyzer: &CycleAnalyzer, today: NaiveDate) -> Self {
        let result = analyzer.detect_current_phase_in(series, today);
        let temperature = series.on(today).map(|r| r.temperature);
        let info = tips::tips_for(result.phase);

        Self {
            date: today,
            temperature,
            has_reading: temperature.is_some(),
            phase: result.phase,
            phase_name: info.name.to_string(),
            description: info.description.to_string(),
            trend: result.trend,
            average_temperature: round_to(result.average_temperature, 2),
            ovulation: result.ovulation,
            predicted_period_date: result.predicted_period_date,
            days_since_ovulation: result.days_since_ovulation,
            readings_count: series.up_to(today).len(),
        }
    }
}
