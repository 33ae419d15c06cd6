//! Core data types shared across the binning pipeline.

/// Feature index type for identifying columns of a feature matrix.
pub type FeatureIndex = usize;

/// Bin index type for discretized feature values.
pub type BinIndex = u32;

/// Per-value sample count type.
pub type SampleCount = usize;
