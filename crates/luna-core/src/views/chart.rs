use chrono::NaiveDate;
use serde::Serialize;

use super::round_to;
use crate::cycle::{CycleAnalyzer, OvulationResult, SampleSeries};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Day number counted from the first reading, starting at 1
    pub day: i64,
    pub temperature: f64,
    pub date: NaiveDate,
    pub is_ovulation_day: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OvulationMarker {
    pub day: i64,
    pub date: NaiveDate,
    pub temperature: Option<f64>,
    pub confidence: Option<f64>,
}

/// Temperature curve with the detected shift marked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub points: Vec<ChartPoint>,
    /// Mean of all readings, one decimal
    pub average_temperature: Option<f64>,
    pub ovulation_markers: Vec<OvulationMarker>,
    pub ovulation: OvulationResult,
    pub total_readings: usize,
}

impl ChartData {
    pub fn build(series: &SampleSeries, analyzer: &CycleAnalyzer) -> Self {
        let ovulation = analyzer.detect_ovulation_in(series);
        let ovulation_date = ovulation.detected_date();

        let points: Vec<ChartPoint> = match series.first() {
            Some(first) => series
                .samples()
                .iter()
                .map(|r| ChartPoint {
                    day: (r.date - first.date).num_days() + 1,
                    temperature: r.temperature,
                    date: r.date,
                    is_ovulation_day: ovulation_date == Some(r.date),
                })
                .collect(),
            None => Vec::new(),
        };

        let ovulation_markers = points
            .iter()
            .filter(|p| p.is_ovulation_day)
            .map(|p| OvulationMarker {
                day: p.day,
                date: p.date,
                temperature: ovulation.post_shift_temperature,
                confidence: ovulation.confidence,
            })
            .collect();

        Self {
            average_temperature: series.mean_temperature().map(|m| round_to(m, 1)),
            total_readings: points.len(),
            points,
            ovulation_markers,
            ovulation,
        }
    }
}
