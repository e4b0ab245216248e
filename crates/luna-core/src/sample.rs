//! Demo reading generator.
//!
//! Produces a short, reproducible history shaped like the end of a cycle:
//! a low stretch, a few approaching days and a sustained luteal rise.

use chrono::{Duration, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::cycle::Reading;

/// Days of demo history.
pub const SAMPLE_DAYS: i64 = 14;

const SAMPLE_BASELINE_CELSIUS: f64 = 36.4;

/// Generate [`SAMPLE_DAYS`] readings ending on `end`, oldest first.
///
/// The same seed always yields the same temperatures.
pub fn generate_sample_readings(end: NaiveDate, seed: u64) -> Vec<Reading> {
    let mut rng = Pcg64::seed_from_u64(seed);

    (0..SAMPLE_DAYS)
        .rev()
        .map(|days_ago| {
            let offset = if days_ago >= 10 {
                rng.gen_range(-0.05..0.10)
            } else if days_ago >= 7 {
                0.1 + rng.gen_range(0.0..0.10)
            } else {
                0.3 + rng.gen_range(0.0..0.15)
            };
            let temperature = ((SAMPLE_BASELINE_CELSIUS + offset) * 100.0).round() / 100.0;
            Reading::new(temperature, end - Duration::days(days_ago))
        })
        .collect()
}
