//! Feature discretization for in-memory datasets.
//!
//! [`binning`] holds the greedy bin finder and the per-feature mappers built
//! on it; [`preprocessing`] prepares raw values before they are counted.

pub mod binning;
pub mod preprocessing;

// Re-export commonly used types
pub use binning::{
    greedy_find_bin, BinMapper, BinningStatistics, FeatureBinner, FeatureStats,
};
pub use preprocessing::{preprocess_column, preprocess_value};
