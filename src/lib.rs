//! # Greedy Binning
//!
//! Histogram-based discretization of numeric features for gradient boosting,
//! built around LightGBM's greedy bin-boundary heuristic.
//!
//! Given the sorted distinct values of a feature and their occurrence counts,
//! [`greedy_find_bin`] produces right-open bin upper bounds that
//!
//! - never exceed `max_bin` bins,
//! - merge sparse neighbouring values until a bin holds `min_data_in_bin` samples,
//! - give values with disproportionately high frequency an exclusive bin.
//!
//! The last bound is always `+inf`, and value `v` belongs to the first bin `j`
//! with `v < bounds[j]`.
//!
//! ## Quick Start
//!
//! ### Boundaries from frequency statistics
//!
//! ```rust
//! use greedy_binning::greedy_find_bin;
//!
//! # fn main() -> greedy_binning::Result<()> {
//! let distinct_values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let counts = [1, 1, 5, 1, 1];
//!
//! let bounds = greedy_find_bin(&distinct_values, &counts, 5, 5, 9, 3)?;
//! assert_eq!(bounds, vec![3.5, f64::INFINITY]);
//! # Ok(())
//! # }
//! ```
//!
//! ### Binning a feature matrix
//!
//! ```rust
//! use greedy_binning::{BinConfigBuilder, FeatureBinner};
//! use ndarray::array;
//!
//! # fn main() -> greedy_binning::Result<()> {
//! let features = array![[0.1, 3.0], [0.2, 3.0], [0.3, 3.0], [0.9, 8.0]];
//!
//! let config = BinConfigBuilder::new()
//!     .max_bin(16)
//!     .min_data_in_bin(1)
//!     .build()?;
//!
//! let mut binner = FeatureBinner::new(config)?;
//! let binned = binner.fit_transform(&features)?;
//! assert_eq!(binned.dim(), (4, 2));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: error type, constants, shared type aliases and logging setup
//! - [`config`]: [`BinConfig`] with builder, validation and file loading
//! - [`dataset`]: value preprocessing, frequency statistics, the greedy finder,
//!   bin mappers and the parallel [`FeatureBinner`]
//!
//! Binning a single feature is sequential and deterministic. Features are
//! independent, so [`FeatureBinner`] fits them in parallel with Rayon.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    non_snake_case,
    non_upper_case_globals
)]

// Core infrastructure module - always available
pub mod core;

// Configuration management module
pub mod config;

// Feature binning module
pub mod dataset;

// Re-export core functionality for convenience
pub use crate::core::{
    constants::*,
    error::{BinningError, Result},
    types::*,
};

// Re-export configuration functionality
pub use config::{BinConfig, BinConfigBuilder};

// Re-export binning functionality
pub use dataset::{
    greedy_find_bin, BinMapper, BinningStatistics, FeatureBinner, FeatureStats,
};

// Version information
pub use crate::core::constants::GREEDY_BINNING_VERSION as VERSION;

/// Initialize the library.
///
/// Sets up `env_logger` with an `info` default filter (overridable through
/// `RUST_LOG`). Calling it is optional; without it log records are dropped
/// unless the application installs its own logger.
///
/// # Examples
///
/// ```rust
/// greedy_binning::init();
/// ```
pub fn init() {
    crate::core::initialize_logging();
}
