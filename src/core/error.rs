//! Error handling and error types for greedy binning.
//!
//! Every fallible operation in the crate returns [`Result`], so callers see
//! configuration mistakes and malformed feature statistics as values instead
//! of panics or silently mis-placed bin boundaries.

use std::io;
use thiserror::Error;

/// Main error type for the binning library.
#[derive(Error, Debug)]
pub enum BinningError {
    /// Configuration and validation errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}, {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    /// Distinct value / count statistics that violate their invariants
    #[error("Invalid feature statistics: {message}")]
    InvalidStatistics { message: String },

    /// Dimension mismatch errors
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    /// A transform was requested before any bin mappers were fitted
    #[error("Feature binner has not been fitted")]
    NotFitted,

    /// File I/O errors
    #[error("I/O error: {source}")]
    IO {
        #[from]
        source: io::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

/// Type alias for Results using BinningError
pub type Result<T> = std::result::Result<T, BinningError>;

impl BinningError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        BinningError::Config {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<P, V, R>(parameter: P, value: V, reason: R) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        BinningError::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid statistics error
    pub fn invalid_statistics<S: Into<String>>(message: S) -> Self {
        BinningError::InvalidStatistics {
            message: message.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch<E, A>(expected: E, actual: A) -> Self
    where
        E: Into<String>,
        A: Into<String>,
    {
        BinningError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Check if this error is recoverable.
    ///
    /// Binning is deterministic, so only I/O failures can succeed on retry.
    pub fn is_recoverable(&self) -> bool {
        match self {
            BinningError::Config { .. } => false,
            BinningError::InvalidParameter { .. } => false,
            BinningError::InvalidStatistics { .. } => false,
            BinningError::DimensionMismatch { .. } => false,
            BinningError::NotFitted => false,
            BinningError::IO { .. } => true,
            BinningError::Json { .. } => false,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            BinningError::Config { .. } => "config",
            BinningError::InvalidParameter { .. } => "invalid_parameter",
            BinningError::InvalidStatistics { .. } => "invalid_statistics",
            BinningError::DimensionMismatch { .. } => "dimension_mismatch",
            BinningError::NotFitted => "not_fitted",
            BinningError::IO { .. } => "io",
            BinningError::Json { .. } => "json",
        }
    }
}
