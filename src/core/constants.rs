//! Default parameters and numeric constants for greedy binning.
//!
//! Defaults follow LightGBM's dataset parameters so that a default
//! configuration produces the same boundaries as the reference heuristic.

/// Default maximum number of bins per feature.
pub const DEFAULT_MAX_BIN: usize = 255;

/// Default minimum number of samples a bin should collect before it is closed.
pub const DEFAULT_MIN_DATA_IN_BIN: usize = 3;

/// Default replacement for missing (NaN) feature values.
pub const DEFAULT_MISSING_FILL_VALUE: f64 = 0.0;

/// Largest bin count representable by a [`BinIndex`](crate::core::types::BinIndex)
/// column that downstream histogram code is expected to handle.
pub const MAX_SUPPORTED_BIN: usize = 65535;

/// Fraction of the mean bin size a bin must reach before it is closed early
/// to let the following big-count value start its own bin.
pub const LOOK_AHEAD_CLOSE_RATIO: f64 = 0.5;

/// Lower limit on the look-ahead close threshold, in samples.
pub const LOOK_AHEAD_MIN_COUNT: f64 = 1.0;

/// Crate version string.
pub const GREEDY_BINNING_VERSION: &str = env!("CARGO_PKG_VERSION");

mod compile_time_assertions {
    use super::*;
    use static_assertions::*;

    const_assert!(DEFAULT_MAX_BIN > 0);
    const_assert!(DEFAULT_MAX_BIN <= MAX_SUPPORTED_BIN);
    const_assert!(MAX_SUPPORTED_BIN <= u32::MAX as usize);
    const_assert!(LOOK_AHEAD_CLOSE_RATIO > 0.0);
    const_assert!(LOOK_AHEAD_CLOSE_RATIO < 1.0);
}
