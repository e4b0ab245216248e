//! Property tests for ovulation detection.

use chrono::{Duration, NaiveDate};
use luna_core::{CycleAnalyzer, Phase, Reading};
use proptest::prelude::*;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// Readings on strictly increasing dates, one to three days apart.
fn history(max_len: usize) -> impl Strategy<Value = Vec<Reading>> {
    prop::collection::vec((1i64..=3, 35.5f64..37.8), 0..max_len).prop_map(|steps| {
        let mut offset = 0;
        steps
            .into_iter()
            .map(|(gap, temperature)| {
                offset += gap;
                Reading::new(temperature, start() + Duration::days(offset))
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn detection_is_idempotent(readings in history(40)) {
        let analyzer = CycleAnalyzer::new();
        let first = analyzer.detect_ovulation(&readings).unwrap();
        let second = analyzer.detect_ovulation(&readings).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn short_series_never_detects(readings in history(4)) {
        let analyzer = CycleAnalyzer::new();
        prop_assert!(!analyzer.detect_ovulation(&readings).unwrap().detected);

        let today = readings.last().map_or(start(), |r| r.date);
        let result = analyzer.detect_current_phase(&readings, today).unwrap();
        prop_assert_eq!(result.phase, Phase::InsufficientData);
    }

    #[test]
    fn appending_a_low_reading_never_creates_a_shift(
        readings in history(30),
        drop in 0.01f64..0.4,
        gap in 1i64..=3,
    ) {
        let analyzer = CycleAnalyzer::new();
        let before = analyzer.detect_ovulation(&readings).unwrap();
        prop_assume!(!before.detected);

        let lowest = readings.iter().map(|r| r.temperature).fold(36.0, f64::min);
        let last = readings.last().map_or(start(), |r| r.date);
        let mut extended = readings.clone();
        extended.push(Reading::new(lowest - drop, last + Duration::days(gap)));

        prop_assert!(!analyzer.detect_ovulation(&extended).unwrap().detected);
    }

    #[test]
    fn confidence_stays_in_unit_range(readings in history(40)) {
        let result = CycleAnalyzer::new().detect_ovulation(&readings).unwrap();
        if let Some(confidence) = result.confidence {
            prop_assert!((0.0..=1.0).contains(&confidence));
        }
        prop_assert_eq!(result.detected, result.date.is_some());
    }
}
