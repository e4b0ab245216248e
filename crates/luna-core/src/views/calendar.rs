use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::cycle::{CycleAnalyzer, OvulationResult, Phase, SampleSeries};

/// Below `mean - LOW_OFFSET` a reading is treated as follicular when no
/// ovulation has been detected.
const LOW_OFFSET_CELSIUS: f64 = 0.1;
/// Above `mean + HIGH_OFFSET` a reading is treated as luteal.
const HIGH_OFFSET_CELSIUS: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDay {
    pub day: u32,
    pub date: NaiveDate,
    pub has_reading: bool,
    pub temperature: Option<f64>,
    /// Only set for days with a reading
    pub phase: Option<Phase>,
    pub is_ovulation_day: bool,
}

/// One calendar month annotated with readings and phases.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub days_in_month: u32,
    pub days: Vec<CalendarDay>,
    pub ovulation: OvulationResult,
    pub current_phase: Phase,
}

impl CalendarMonth {
    /// Build the view for `year`/`month` (1-12).
    ///
    /// Returns `None` when the month does not exist.
    pub fn build(
        series: &SampleSeries,
        analyzer: &CycleAnalyzer,
        year: i32,
        month: u32,
        today: NaiveDate,
    ) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        let days_in_month = (next - first).num_days() as u32;

        let ovulation = analyzer.detect_ovulation_in(series);
        let current_phase = analyzer.detect_current_phase_in(series, today).phase;
        let mean = series.mean_temperature();

        let days = (0..days_in_month)
            .map(|offset| {
                let date = first + Duration::days(i64::from(offset));
                let temperature = series.on(date).map(|r| r.temperature);
                let phase = temperature.and_then(|t| match ovulation.detected_date() {
                    Some(ov) => Some(
                        analyzer
                            .classifier()
                            .phase_after_ovulation((date - ov).num_days()),
                    ),
                    None => mean.and_then(|m| fallback_phase(t, m)),
                });

                CalendarDay {
                    day: date.day(),
                    date,
                    has_reading: temperature.is_some(),
                    temperature,
                    phase,
                    is_ovulation_day: ovulation.detected_date() == Some(date),
                }
            })
            .collect();

        Some(Self {
            year,
            month,
            days_in_month,
            days,
            ovulation,
            current_phase,
        })
    }
}

fn fallback_phase(temperature: f64, mean: f64) -> Option<Phase> {
    if temperature < mean - LOW_OFFSET_CELSIUS {
        Some(Phase::PreOvulation)
    } else if temperature > mean + HIGH_OFFSET_CELSIUS {
        Some(Phase::Luteal)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::{CycleParams, Reading};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn series(pairs: &[(u32, f64)]) -> SampleSeries {
        let readings: Vec<_> = pairs.iter().map(|&(d, t)| Reading::new(t, date(d))).collect();
        SampleSeries::new(&readings, &CycleParams::default()).unwrap()
    }

    #[test]
    fn invalid_month_is_none() {
        let s = SampleSeries::default();
        assert!(CalendarMonth::build(&s, &CycleAnalyzer::new(), 2024, 13, date(1)).is_none());
        assert!(CalendarMonth::build(&s, &CycleAnalyzer::new(), 2024, 0, date(1)).is_none());
    }

    #[test]
    fn month_lengths() {
        let s = SampleSeries::default();
        let analyzer = CycleAnalyzer::new();
        let feb = CalendarMonth::build(&s, &analyzer, 2024, 2, date(1)).unwrap();
        assert_eq!(feb.days_in_month, 29);
        assert_eq!(feb.days.len(), 29);
        let dec = CalendarMonth::build(&s, &analyzer, 2023, 12, date(1)).unwrap();
        assert_eq!(dec.days_in_month, 31);
        assert_eq!(dec.days.last().unwrap().date, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    }

    #[test]
    fn phases_relative_to_ovulation() {
        let mut pairs: Vec<(u32, f64)> = (1..=6).map(|d| (d, 36.3)).collect();
        pairs.extend((7..=25).map(|d| (d, 36.8)));
        let s = series(&pairs);
        let month = CalendarMonth::build(&s, &CycleAnalyzer::new(), 2024, 3, date(25)).unwrap();

        assert_eq!(month.ovulation.date, Some(date(7)));
        let day = |d: u32| &month.days[(d - 1) as usize];
        assert_eq!(day(3).phase, Some(Phase::PreOvulation));
        assert_eq!(day(7).phase, Some(Phase::Ovulation));
        assert!(day(7).is_ovulation_day);
        assert_eq!(day(21).phase, Some(Phase::Luteal));
        assert_eq!(day(22).phase, Some(Phase::PreMenstrual));
        assert_eq!(day(28).phase, None);
        assert!(!day(28).has_reading);
        assert_eq!(month.current_phase, Phase::PreMenstrual);
    }

    #[test]
    fn mean_fallback_without_ovulation() {
        // Mean ~36.46; the alternating lows never hold above the coverline.
        let s = series(&[
            (1, 36.5),
            (2, 36.3),
            (3, 36.5),
            (4, 36.3),
            (5, 36.5),
            (6, 36.3),
            (7, 36.8),
            (8, 36.45),
        ]);
        let month = CalendarMonth::build(&s, &CycleAnalyzer::new(), 2024, 3, date(8)).unwrap();
        assert!(!month.ovulation.detected);
        assert_eq!(month.days[0].phase, None);
        assert_eq!(month.days[1].phase, Some(Phase::PreOvulation));
        assert_eq!(month.days[6].phase, Some(Phase::Luteal));
        assert_eq!(month.days[7].phase, None);
    }
}
