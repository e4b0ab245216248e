pub mod analyze;
pub mod calendar;
pub mod chart;
pub mod config;
pub mod reading;
pub mod stats;
pub mod tips;
pub mod today;

use chrono::{NaiveDate, Utc};
use luna_core::{Config, CycleAnalyzer, Database, SampleSeries};
use serde::Serialize;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Database, configuration and analyzer for one command invocation.
pub struct Context {
    pub db: Database,
    pub config: Config,
    pub analyzer: CycleAnalyzer,
}

impl Context {
    /// An unreadable config falls back to defaults with a warning; only
    /// `luna config` reports config errors.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load_or_default();
        let analyzer = CycleAnalyzer::with_params(config.analysis.clone())?;
        let db = Database::open()?;
        Ok(Self {
            db,
            config,
            analyzer,
        })
    }

    /// Stored readings as an analysis series; rows outside the configured
    /// plausible range are skipped with a warning.
    pub fn series(&self) -> Result<SampleSeries, Box<dyn std::error::Error>> {
        let readings = self.db.analysis_readings()?;
        let (series, _rejected) = SampleSeries::lenient(&readings, self.analyzer.params());
        Ok(series)
    }
}

pub fn today_or(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Utc::now().date_naive())
}

pub fn print_json<T: Serialize>(value: &T) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
