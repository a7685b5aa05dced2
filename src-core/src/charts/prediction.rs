//! Compound-growth projection of the chart total.

use std::collections::BTreeMap;

use crate::charts::charts_model::{percentage_key, PredictionEntry};

/// Number of future years projected.
pub const PREDICTION_YEARS: i32 = 40;

/// Rounds to the nearest integer with halves going towards positive infinity
/// (`-2.5` becomes `-2`, `2.5` becomes `3`).
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Projects `current_total` forward for [`PREDICTION_YEARS`] years, one column
/// per percentage. Entry `i` is for `current_year + i + 1`.
///
/// Each column compounds annually and is rounded after every step, so rounding
/// carries into the following years.
pub fn project(current_total: f64, percentages: &[f64], current_year: i32) -> Vec<PredictionEntry> {
    let mut accumulators: Vec<(String, f64, f64)> = percentages
        .iter()
        .map(|&p| (percentage_key(p), p, current_total))
        .collect();

    (1..=PREDICTION_YEARS)
        .map(|offset| {
            let mut projections = BTreeMap::new();
            for (key, percentage, total) in accumulators.iter_mut() {
                *total += *total * *percentage / 100.0;
                *total = round_half_up(*total);
                projections.insert(key.clone(), *total);
            }
            PredictionEntry {
                year: current_year + offset,
                projections,
            }
        })
        .collect()
}
