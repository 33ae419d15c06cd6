//! Per-feature frequency statistics.
//!
//! A [`FeatureStats`] is the sorted `(distinct value, count)` table the greedy
//! bin finder consumes. It is produced by a value-counting pass over a column
//! and checked against the invariants the heuristic relies on: parallel
//! lengths, strictly increasing finite values and a consistent total.

use crate::core::error::{BinningError, Result};
use crate::core::types::SampleCount;
use serde::{Deserialize, Serialize};

/// Sorted distinct values of one feature with their occurrence counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureStats {
    distinct_values: Vec<f64>,
    counts: Vec<SampleCount>,
    total_cnt: SampleCount,
}

impl FeatureStats {
    /// Create statistics from pre-aggregated distinct values and counts.
    pub fn new(distinct_values: Vec<f64>, counts: Vec<SampleCount>) -> Result<Self> {
        let total_cnt = checked_total(&counts)?;
        validate_statistics(&distinct_values, &counts, distinct_values.len(), total_cnt)?;
        Ok(FeatureStats {
            distinct_values,
            counts,
            total_cnt,
        })
    }

    /// Count the distinct values of a raw column.
    ///
    /// Missing values must already be filled; NaN and infinite values are
    /// rejected.
    pub fn from_values(values: &[f64]) -> Result<Self> {
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(BinningError::invalid_statistics(format!(
                "non-finite value {} at row {}",
                values[pos], pos
            )));
        }

        let mut sorted = values.to_vec();
        sorted.sort_unstable_by(f64::total_cmp);

        let mut distinct_values: Vec<f64> = Vec::new();
        let mut counts: Vec<SampleCount> = Vec::new();
        for value in sorted {
            // -0.0 and 0.0 compare equal and share a slot
            match distinct_values.last() {
                Some(&last) if last == value => {
                    if let Some(count) = counts.last_mut() {
                        *count += 1;
                    }
                }
                _ => {
                    distinct_values.push(value);
                    counts.push(1);
                }
            }
        }

        Ok(FeatureStats {
            distinct_values,
            counts,
            total_cnt: values.len(),
        })
    }

    /// Sorted distinct values
    pub fn distinct_values(&self) -> &[f64] {
        &self.distinct_values
    }

    /// Occurrence count of each distinct value
    pub fn counts(&self) -> &[SampleCount] {
        &self.counts
    }

    /// Total number of samples
    pub fn total_cnt(&self) -> SampleCount {
        self.total_cnt
    }

    /// Number of distinct values
    pub fn num_distinct_values(&self) -> usize {
        self.distinct_values.len()
    }

    /// Whether the feature has no samples at all
    pub fn is_empty(&self) -> bool {
        self.distinct_values.is_empty()
    }

    /// Smallest observed value
    pub fn min_value(&self) -> Option<f64> {
        self.distinct_values.first().copied()
    }

    /// Largest observed value
    pub fn max_value(&self) -> Option<f64> {
        self.distinct_values.last().copied()
    }

    /// Re-check the invariants of these statistics
    pub fn validate(&self) -> Result<()> {
        validate_statistics(
            &self.distinct_values,
            &self.counts,
            self.num_distinct_values(),
            self.total_cnt,
        )
    }
}

fn checked_total(counts: &[SampleCount]) -> Result<SampleCount> {
    counts
        .iter()
        .try_fold(0usize, |acc, &count| acc.checked_add(count))
        .ok_or_else(|| BinningError::invalid_statistics("sum of counts overflows"))
}

/// Check a `(distinct_values, counts)` table before binning it.
pub fn validate_statistics(
    distinct_values: &[f64],
    counts: &[SampleCount],
    num_distinct_values: usize,
    total_cnt: SampleCount,
) -> Result<()> {
    if distinct_values.len() != num_distinct_values || counts.len() != num_distinct_values {
        return Err(BinningError::dimension_mismatch(
            format!("{} distinct values and counts", num_distinct_values),
            format!(
                "{} distinct values and {} counts",
                distinct_values.len(),
                counts.len()
            ),
        ));
    }

    if let Some(pos) = distinct_values.iter().position(|v| !v.is_finite()) {
        return Err(BinningError::invalid_statistics(format!(
            "distinct value at index {} is not finite: {}",
            pos, distinct_values[pos]
        )));
    }

    if let Some(pos) = distinct_values.windows(2).position(|w| w[0] >= w[1]) {
        return Err(BinningError::invalid_statistics(format!(
            "distinct values must be strictly increasing, got {} then {} at index {}",
            distinct_values[pos],
            distinct_values[pos + 1],
            pos + 1
        )));
    }

    let sum = checked_total(counts)?;
    if sum != total_cnt {
        return Err(BinningError::invalid_statistics(format!(
            "sum of counts ({}) does not match total_cnt ({})",
            sum, total_cnt
        )));
    }

    Ok(())
}
