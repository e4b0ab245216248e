//! # Luna Core Library
//!
//! Basal body temperature (BBT) cycle analysis. Given a history of daily
//! waking temperatures, the engine detects ovulation from a sustained
//! thermal shift, labels the current cycle phase and predicts the next
//! period. The `luna` CLI is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Cycle engine**: pure, stateless analysis over a snapshot of readings
//! - **Storage**: SQLite reading history and TOML configuration
//! - **Views**: today, calendar and chart projections for display
//! - **Tips**: static advice keyed by phase
//!
//! ## Key Components
//!
//! - [`CycleAnalyzer`]: ovulation detection and phase classification
//! - [`Database`]: reading persistence
//! - [`Config`]: application configuration management

pub mod cycle;
pub mod error;
pub mod sample;
pub mod storage;
pub mod tips;
pub mod views;

pub use cycle::{
    CycleAnalyzer, CycleParams, OvulationResult, Phase, PhaseResult, Reading, SampleSeries, Trend,
};
pub use error::{AnalysisError, ConfigError, CoreError, DatabaseError};
pub use storage::{Config, Database};
pub use views::{CalendarMonth, ChartData, TodaySummary};
