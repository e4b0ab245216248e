//! Read-only projections of the reading history for display.
//!
//! Each view is built from a [`SampleSeries`](crate::cycle::SampleSeries)
//! snapshot plus a [`CycleAnalyzer`](crate::cycle::CycleAnalyzer); none of
//! them touch storage.

mod calendar;
mod chart;
mod today;

pub use calendar::{CalendarDay, CalendarMonth};
pub use chart::{ChartData, ChartPoint, OvulationMarker};
pub use today::TodaySummary;

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
