//! Readings and the normalized sample series.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::params::CycleParams;
use crate::error::AnalysisError;

/// One basal body temperature reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Storage identifier, when the reading came from the database.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Temperature in °C
    pub temperature: f64,
    /// Calendar date the reading belongs to
    pub date: NaiveDate,
}

impl Reading {
    pub fn new(temperature: f64, date: NaiveDate) -> Self {
        Self {
            id: None,
            temperature,
            date,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Reject temperatures outside the plausible BBT range.
    ///
    /// # Errors
    /// Returns [`AnalysisError::InvalidReading`]; values are never clamped.
    pub fn validate(&self, params: &CycleParams) -> Result<(), AnalysisError> {
        if params.is_plausible(self.temperature) {
            Ok(())
        } else {
            Err(AnalysisError::InvalidReading {
                date: self.date,
                temperature: self.temperature,
                min: params.min_plausible_celsius,
                max: params.max_plausible_celsius,
            })
        }
    }
}

/// Date-sorted, de-duplicated view over a reading history.
///
/// Dates are strictly increasing. When several readings share a date the
/// one appearing last in the input wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSeries {
    samples: Vec<Reading>,
}

impl SampleSeries {
    /// Build a series, failing on the first implausible reading.
    ///
    /// # Errors
    /// Returns [`AnalysisError::InvalidReading`] for the first reading
    /// outside the plausible range, in input order.
    pub fn new(readings: &[Reading], params: &CycleParams) -> Result<Self, AnalysisError> {
        for reading in readings {
            reading.validate(params)?;
        }
        Ok(Self::collect(readings.iter()))
    }

    /// Build a series from the plausible readings only.
    ///
    /// The rejected readings are returned alongside so the host can
    /// surface them without losing the rest of the history.
    pub fn lenient(readings: &[Reading], params: &CycleParams) -> (Self, Vec<AnalysisError>) {
        let mut rejected = Vec::new();
        let valid = readings.iter().filter(|r| match r.validate(params) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("dropping reading: {e}");
                rejected.push(e);
                false
            }
        });
        let series = Self::collect(valid);
        (series, rejected)
    }

    fn collect<'a>(readings: impl Iterator<Item = &'a Reading>) -> Self {
        let mut by_date: BTreeMap<NaiveDate, Reading> = BTreeMap::new();
        for reading in readings {
            by_date.insert(reading.date, reading.clone());
        }
        Self {
            samples: by_date.into_values().collect(),
        }
    }

    pub fn samples(&self) -> &[Reading] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&Reading> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Reading> {
        self.samples.last()
    }

    /// The sample recorded on `date`, if any.
    pub fn on(&self, date: NaiveDate) -> Option<&Reading> {
        self.samples
            .binary_search_by_key(&date, |r| r.date)
            .ok()
            .map(|i| &self.samples[i])
    }

    /// Sub-series of samples dated on or before `date`.
    pub fn up_to(&self, date: NaiveDate) -> SampleSeries {
        let end = self.samples.partition_point(|r| r.date <= date);
        Self {
            samples: self.samples[..end].to_vec(),
        }
    }

    /// Arithmetic mean temperature, or `None` for an empty series.
    pub fn mean_temperature(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        let sum: f64 = self.samples.iter().map(|r| r.temperature).sum();
        Some(sum / self.samples.len() as f64)
    }

    /// Temperatures in date order.
    pub fn temperatures(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|r| r.temperature)
    }
}
