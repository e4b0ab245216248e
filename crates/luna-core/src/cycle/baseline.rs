//! Coverline estimation.
//!
//! The coverline is the highest of the most recent low temperatures
//! preceding a candidate rise. Taking the maximum keeps a single noisy
//! low reading from producing a false shift.

use serde::{Deserialize, Serialize};

use super::reading::Reading;

/// A coverline and the number of readings it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    /// Coverline temperature (°C)
    pub temperature: f64,
    /// Readings that contributed, at most the configured window
    pub sample_count: usize,
}

/// Computes the coverline from readings preceding a candidate day.
#[derive(Debug, Clone)]
pub struct BaselineEstimator {
    /// Number of preceding readings considered
    pub window: usize,
}

impl BaselineEstimator {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    /// Coverline over the last `window` readings of `preceding`.
    ///
    /// `preceding` must be date-ordered and end strictly before the
    /// candidate day. Returns `None` when it is empty.
    pub fn estimate(&self, preceding: &[Reading]) -> Option<Baseline> {
        let start = preceding.len().saturating_sub(self.window);
        let window = &preceding[start..];
        let temperature = window
            .iter()
            .map(|r| r.temperature)
            .fold(None, |acc: Option<f64>, t| Some(acc.map_or(t, |m| m.max(t))))?;
        Some(Baseline {
            temperature,
            sample_count: window.len(),
        })
    }

    /// Coverline for the candidate at `index` within `samples`.
    pub fn estimate_before(&self, samples: &[Reading], index: usize) -> Option<Baseline> {
        self.estimate(&samples[..index.min(samples.len())])
    }
}
