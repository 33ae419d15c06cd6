//! Feature binning system.
//!
//! This module provides feature discretization (binning) for numerical
//! features. Each column of a feature matrix is preprocessed, reduced to its
//! distinct-value frequency table and handed to the greedy bin finder; the
//! resulting [`BinMapper`]s turn raw values into integer bin codes.

pub mod greedy;
pub mod mapper;
pub mod stats;

// Re-export commonly used types
pub use greedy::greedy_find_bin;
pub use mapper::BinMapper;
pub use stats::FeatureStats;

use crate::config::BinConfig;
use crate::core::error::{BinningError, Result};
use crate::core::types::{BinIndex, FeatureIndex};
use crate::dataset::preprocessing::{count_missing, preprocess_column, preprocess_value};
use ndarray::{Array1, Array2, ArrayView1};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fits one [`BinMapper`] per feature and applies them to feature matrices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureBinner {
    /// Binning configuration
    config: BinConfig,
    /// Bin mappers for each feature, `None` until fitted
    bin_mappers: Option<Vec<BinMapper>>,
}

/// Summary of a fitted binner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinningStatistics {
    /// Number of features processed
    pub num_features: usize,
    /// Features that collapsed into a single bin
    pub num_trivial: usize,
    /// Average number of bins per feature
    pub avg_bins_per_feature: f64,
    /// Largest bin count over all features
    pub max_bins: usize,
}

impl FeatureBinner {
    /// Create a new feature binner
    pub fn new(config: BinConfig) -> Result<Self> {
        config.validate()?;
        Ok(FeatureBinner {
            config,
            bin_mappers: None,
        })
    }

    /// Fit bin boundaries for every column of `features`.
    ///
    /// Features are independent, so they are binned in parallel; mappers are
    /// stored in column order.
    pub fn fit(&mut self, features: &Array2<f64>) -> Result<()> {
        let num_features = features.ncols();

        if let Some(ref per_feature) = self.config.max_bin_by_feature {
            if per_feature.len() != num_features {
                return Err(BinningError::dimension_mismatch(
                    format!("max_bin_by_feature for {} features", num_features),
                    format!("{} entries", per_feature.len()),
                ));
            }
        }

        let bin_mappers = (0..num_features)
            .into_par_iter()
            .map(|feature| self.fit_feature(feature, features.column(feature)))
            .collect::<Result<Vec<_>>>()?;

        self.bin_mappers = Some(bin_mappers);

        if let Some(stats) = self.statistics() {
            log::info!(
                "Binned {} features over {} rows: {:.1} bins per feature on average, {} trivial",
                stats.num_features,
                features.nrows(),
                stats.avg_bins_per_feature,
                stats.num_trivial
            );
        }
        Ok(())
    }

    fn fit_feature(
        &self,
        feature: FeatureIndex,
        column: ArrayView1<'_, f64>,
    ) -> Result<BinMapper> {
        let num_missing = count_missing(column);
        if num_missing > 0 {
            log::debug!(
                "Feature {}: filling {} missing values with {}",
                feature,
                num_missing,
                self.config.missing_fill_value
            );
        }

        let values = preprocess_column(column, &self.config);
        let stats = FeatureStats::from_values(&values).map_err(|e| match e {
            BinningError::InvalidStatistics { message } => {
                BinningError::invalid_statistics(format!("feature {}: {}", feature, message))
            }
            other => other,
        })?;

        let max_bin = self.config.max_bin_for_feature(feature);
        let mut mapper = BinMapper::from_stats(&stats, max_bin, self.config.min_data_in_bin)?;
        mapper.set_missing_value(preprocess_value(f64::NAN, &self.config));

        log::debug!(
            "Feature {}: {} distinct values -> {} bins (max_bin={})",
            feature,
            stats.num_distinct_values(),
            mapper.num_bin(),
            max_bin
        );
        if mapper.is_trivial() {
            log::warn!(
                "Feature {} has only one bin and carries no split information",
                feature
            );
        }
        Ok(mapper)
    }

    /// Map every value of `features` to its bin index.
    pub fn transform(&self, features: &Array2<f64>) -> Result<Array2<BinIndex>> {
        let bin_mappers = self.bin_mappers.as_ref().ok_or(BinningError::NotFitted)?;

        if features.ncols() != bin_mappers.len() {
            return Err(BinningError::dimension_mismatch(
                format!("{} features", bin_mappers.len()),
                format!("{} features", features.ncols()),
            ));
        }

        let columns: Vec<Vec<BinIndex>> = bin_mappers
            .par_iter()
            .enumerate()
            .map(|(feature, mapper)| {
                features
                    .column(feature)
                    .iter()
                    .map(|&value| mapper.value_to_bin(preprocess_value(value, &self.config)))
                    .collect()
            })
            .collect();

        let mut binned = Array2::<BinIndex>::zeros(features.raw_dim());
        for (feature, column) in columns.into_iter().enumerate() {
            binned.column_mut(feature).assign(&Array1::from_vec(column));
        }
        Ok(binned)
    }

    /// Fit on `features` and return their bin indices.
    pub fn fit_transform(&mut self, features: &Array2<f64>) -> Result<Array2<BinIndex>> {
        self.fit(features)?;
        self.transform(features)
    }

    /// Whether `fit` has been called
    pub fn is_fitted(&self) -> bool {
        self.bin_mappers.is_some()
    }

    /// Fitted bin mappers, one per feature
    pub fn bin_mappers(&self) -> Result<&[BinMapper]> {
        self.bin_mappers
            .as_deref()
            .ok_or(BinningError::NotFitted)
    }

    /// Binning configuration
    pub fn config(&self) -> &BinConfig {
        &self.config
    }

    /// Summary of the fitted mappers
    pub fn statistics(&self) -> Option<BinningStatistics> {
        let bin_mappers = self.bin_mappers.as_ref()?;
        let num_features = bin_mappers.len();
        let total_bins: usize = bin_mappers.iter().map(BinMapper::num_bin).sum();

        Some(BinningStatistics {
            num_features,
            num_trivial: bin_mappers.iter().filter(|m| m.is_trivial()).count(),
            avg_bins_per_feature: if num_features == 0 {
                0.0
            } else {
                total_bins as f64 / num_features as f64
            },
            max_bins: bin_mappers.iter().map(BinMapper::num_bin).max().unwrap_or(0),
        })
    }

    /// Save the configuration and fitted mappers as JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load a binner previously written by [`FeatureBinner::save_to_file`]
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let binner: FeatureBinner = serde_json::from_str(&content)?;
        binner.config.validate()?;
        Ok(binner)
    }
}
