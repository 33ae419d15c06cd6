//! Bin mapper: maps raw feature values to bin indices.
//!
//! A [`BinMapper`] owns the upper bounds produced by the greedy finder and
//! applies the right-open interval rule: value `v` belongs to the smallest
//! bin `j` with `v < upper_bound[j]`.

use crate::core::constants::MAX_SUPPORTED_BIN;
use crate::core::error::{BinningError, Result};
use crate::core::types::BinIndex;
use crate::dataset::binning::greedy::greedy_find_bin;
use crate::dataset::binning::stats::FeatureStats;
use serde::{Deserialize, Serialize};

/// Numerical bin mapper for one feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "BinMapperRepr", try_from = "BinMapperRepr")]
pub struct BinMapper {
    /// Upper bounds of each bin; the last one is always +infinity
    bin_upper_bound: Vec<f64>,
    /// Minimum feature value seen while fitting
    min_val: f64,
    /// Maximum feature value seen while fitting
    max_val: f64,
    /// Bin assigned to missing (NaN) values
    default_bin: BinIndex,
}

/// Serialized form: JSON has no infinity, so the sentinel is implied.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BinMapperRepr {
    split_points: Vec<f64>,
    min_val: f64,
    max_val: f64,
    default_bin: BinIndex,
}

impl BinMapper {
    /// Create a trivial mapper with a single unbounded bin
    pub fn new() -> Self {
        BinMapper {
            bin_upper_bound: vec![f64::INFINITY],
            min_val: 0.0,
            max_val: 0.0,
            default_bin: 0,
        }
    }

    /// Fit bin boundaries for a feature from its frequency statistics.
    pub fn from_stats(
        stats: &FeatureStats,
        max_bin: usize,
        min_data_in_bin: usize,
    ) -> Result<Self> {
        if max_bin > MAX_SUPPORTED_BIN {
            return Err(BinningError::invalid_parameter(
                "max_bin",
                max_bin.to_string(),
                format!("must not exceed {}", MAX_SUPPORTED_BIN),
            ));
        }

        let bin_upper_bound = greedy_find_bin(
            stats.distinct_values(),
            stats.counts(),
            stats.num_distinct_values(),
            max_bin,
            stats.total_cnt(),
            min_data_in_bin,
        )?;

        let mut mapper = BinMapper {
            bin_upper_bound,
            min_val: stats.min_value().unwrap_or(0.0),
            max_val: stats.max_value().unwrap_or(0.0),
            default_bin: 0,
        };
        mapper.default_bin = mapper.bin_of(0.0);
        Ok(mapper)
    }

    /// Create a mapper from explicit upper bounds.
    ///
    /// The bounds must be strictly increasing and end with +infinity.
    pub fn from_upper_bounds(bin_upper_bound: Vec<f64>) -> Result<Self> {
        check_upper_bounds(&bin_upper_bound)?;
        let mut mapper = BinMapper {
            bin_upper_bound,
            ..BinMapper::new()
        };
        mapper.default_bin = mapper.bin_of(0.0);
        Ok(mapper)
    }

    /// Route missing values to the bin that holds `value`.
    pub fn set_missing_value(&mut self, value: f64) {
        self.default_bin = self.bin_of(value);
    }

    /// Convert a feature value to its corresponding bin index
    pub fn value_to_bin(&self, value: f64) -> BinIndex {
        if value.is_nan() {
            return self.default_bin;
        }
        self.bin_of(value)
    }

    fn bin_of(&self, value: f64) -> BinIndex {
        let idx = self.bin_upper_bound.partition_point(|&bound| bound <= value);
        // +inf itself falls past the sentinel
        idx.min(self.bin_upper_bound.len() - 1) as BinIndex
    }

    /// Upper bounds of all bins, ending with +infinity
    pub fn bin_upper_bounds(&self) -> &[f64] {
        &self.bin_upper_bound
    }

    /// Number of bins
    pub fn num_bin(&self) -> usize {
        self.bin_upper_bound.len()
    }

    /// Whether the feature collapsed into a single bin
    pub fn is_trivial(&self) -> bool {
        self.num_bin() <= 1
    }

    /// Bin assigned to missing values
    pub fn default_bin(&self) -> BinIndex {
        self.default_bin
    }

    /// Minimum feature value seen while fitting
    pub fn min_val(&self) -> f64 {
        self.min_val
    }

    /// Maximum feature value seen while fitting
    pub fn max_val(&self) -> f64 {
        self.max_val
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for BinMapper {
    fn default() -> Self {
        Self::new()
    }
}

fn check_upper_bounds(bin_upper_bound: &[f64]) -> Result<()> {
    match bin_upper_bound.last() {
        Some(&last) if last == f64::INFINITY => {}
        _ => {
            return Err(BinningError::invalid_statistics(
                "bin upper bounds must end with +infinity",
            ))
        }
    }
    let finite = &bin_upper_bound[..bin_upper_bound.len() - 1];
    if finite.iter().any(|b| !b.is_finite()) || finite.windows(2).any(|w| w[0] >= w[1]) {
        return Err(BinningError::invalid_statistics(
            "bin upper bounds must be finite and strictly increasing",
        ));
    }
    if bin_upper_bound.len() > MAX_SUPPORTED_BIN {
        return Err(BinningError::invalid_statistics(format!(
            "{} bins exceed the supported maximum of {}",
            bin_upper_bound.len(),
            MAX_SUPPORTED_BIN
        )));
    }
    Ok(())
}

impl From<BinMapper> for BinMapperRepr {
    fn from(mapper: BinMapper) -> Self {
        let mut split_points = mapper.bin_upper_bound;
        split_points.pop();
        BinMapperRepr {
            split_points,
            min_val: mapper.min_val,
            max_val: mapper.max_val,
            default_bin: mapper.default_bin,
        }
    }
}

impl TryFrom<BinMapperRepr> for BinMapper {
    type Error = BinningError;

    fn try_from(repr: BinMapperRepr) -> Result<Self> {
        let mut bin_upper_bound = repr.split_points;
        bin_upper_bound.push(f64::INFINITY);
        check_upper_bounds(&bin_upper_bound)?;

        if repr.default_bin as usize >= bin_upper_bound.len() {
            return Err(BinningError::invalid_statistics(format!(
                "default bin {} out of range for {} bins",
                repr.default_bin,
                bin_upper_bound.len()
            )));
        }

        Ok(BinMapper {
            bin_upper_bound,
            min_val: repr.min_val,
            max_val: repr.max_val,
            default_bin: repr.default_bin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper(bounds: Vec<f64>) -> BinMapper {
        BinMapper::from_upper_bounds(bounds).unwrap()
    }

    #[test]
    fn test_default_mapper_is_trivial() {
        let mapper = BinMapper::new();
        assert_eq!(mapper.num_bin(), 1);
        assert!(mapper.is_trivial());
        assert_eq!(mapper.value_to_bin(123.0), 0);
    }

    #[test]
    fn test_value_to_bin_right_open() {
        let mapper = mapper(vec![0.5, 1.5, f64::INFINITY]);
        assert_eq!(mapper.value_to_bin(-10.0), 0);
        assert_eq!(mapper.value_to_bin(0.3), 0);
        assert_eq!(mapper.value_to_bin(0.5), 1);
        assert_eq!(mapper.value_to_bin(1.0), 1);
        assert_eq!(mapper.value_to_bin(1.5), 2);
        assert_eq!(mapper.value_to_bin(2.0), 2);
        assert_eq!(mapper.value_to_bin(f64::INFINITY), 2);
        assert_eq!(mapper.value_to_bin(f64::NEG_INFINITY), 0);
    }

    #[test]
    fn test_missing_value_routing() {
        let mut mapper = mapper(vec![-1.0, 1.0, f64::INFINITY]);
        assert_eq!(mapper.default_bin(), 1);
        assert_eq!(mapper.value_to_bin(f64::NAN), 1);

        mapper.set_missing_value(5.0);
        assert_eq!(mapper.value_to_bin(f64::NAN), 2);
    }

    #[test]
    fn test_from_stats() {
        let stats = FeatureStats::new(vec![1.0, 2.0, 3.0, 4.0, 5.0], vec![1, 1, 5, 1, 1]).unwrap();
        let mapper = BinMapper::from_stats(&stats, 5, 3).unwrap();
        assert_eq!(mapper.bin_upper_bounds(), &[3.5, f64::INFINITY]);
        assert_eq!(mapper.min_val(), 1.0);
        assert_eq!(mapper.max_val(), 5.0);
        assert_eq!(mapper.value_to_bin(3.0), 0);
        assert_eq!(mapper.value_to_bin(4.0), 1);
    }

    #[test]
    fn test_from_stats_rejects_zero_max_bin() {
        let stats = FeatureStats::from_values(&[1.0, 2.0]).unwrap();
        assert!(BinMapper::from_stats(&stats, 0, 3).is_err());
    }

    #[test]
    fn test_from_upper_bounds_validation() {
        assert!(BinMapper::from_upper_bounds(vec![]).is_err());
        assert!(BinMapper::from_upper_bounds(vec![1.0, 2.0]).is_err());
        assert!(BinMapper::from_upper_bounds(vec![2.0, 1.0, f64::INFINITY]).is_err());
    }

    #[test]
    fn test_json_round_trip_keeps_sentinel() {
        let mapper = mapper(vec![0.5, 1.5, f64::INFINITY]);
        let json = mapper.to_json().unwrap();
        assert!(json.contains("split_points"));
        let restored = BinMapper::from_json(&json).unwrap();
        assert_eq!(restored, mapper);
        assert_eq!(restored.bin_upper_bounds().last(), Some(&f64::INFINITY));
    }

    #[test]
    fn test_from_json_rejects_bad_default_bin() {
        let json = r#"{"split_points":[1.0],"min_val":0.0,"max_val":2.0,"default_bin":5}"#;
        assert!(BinMapper::from_json(json).is_err());
    }
}
