//! Common test utilities for greedy binning integration tests.

#![allow(dead_code)]

use greedy_binning::*;
use ndarray::Array2;
use rand::prelude::*;

/// Index of the bin `value` falls into under the right-open rule.
pub fn bin_of(bounds: &[f64], value: f64) -> usize {
    bounds
        .iter()
        .position(|&bound| value < bound)
        .unwrap_or(bounds.len() - 1)
}

/// Run the greedy finder on a frequency table, deriving `total_cnt`.
pub fn find_bins(
    distinct_values: &[f64],
    counts: &[usize],
    max_bin: usize,
    min_data_in_bin: usize,
) -> Result<Vec<f64>> {
    let total_cnt = counts.iter().sum();
    greedy_find_bin(
        distinct_values,
        counts,
        distinct_values.len(),
        max_bin,
        total_cnt,
        min_data_in_bin,
    )
}

/// Create a feature matrix mixing continuous, low-cardinality and skewed columns.
pub fn create_test_features(num_samples: usize, num_features: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut features = Array2::zeros((num_samples, num_features));

    for i in 0..num_samples {
        for j in 0..num_features {
            features[[i, j]] = match j % 3 {
                0 => rng.gen_range(-5.0..5.0),
                1 => f64::from(rng.gen_range(0u8..6)),
                // half of the rows share a single dominant value
                _ => {
                    if rng.gen_bool(0.5) {
                        0.0
                    } else {
                        rng.gen_range(1.0..100.0)
                    }
                }
            };
        }
    }

    features
}

/// Check the structural invariants every boundary list must satisfy.
pub fn assert_valid_bounds(bounds: &[f64]) {
    assert!(!bounds.is_empty(), "bounds must not be empty");
    assert_eq!(*bounds.last().unwrap(), f64::INFINITY, "last bound must be +inf");
    let finite = &bounds[..bounds.len() - 1];
    assert!(finite.iter().all(|b| b.is_finite()), "{:?}", bounds);
    assert!(
        finite.windows(2).all(|w| w[0] < w[1]),
        "bounds must be strictly increasing: {:?}",
        bounds
    );
}
