//! Value preprocessing applied before distinct values are counted.
//!
//! Missing values are replaced by the configured fill value, and when a
//! quantization scale is set every value is snapped to `floor(v * scale)`.
//! Quantization collapses measurement noise into fewer distinct values,
//! which keeps the greedy finder from spending bins on jitter.

use crate::config::BinConfig;
use ndarray::ArrayView1;

/// Preprocess a single raw feature value.
pub fn preprocess_value(value: f64, config: &BinConfig) -> f64 {
    let value = if value.is_nan() {
        config.missing_fill_value
    } else {
        value
    };
    match config.quantization_scale {
        Some(scale) => (value * scale).floor(),
        None => value,
    }
}

/// Preprocess a whole feature column.
pub fn preprocess_column(column: ArrayView1<'_, f64>, config: &BinConfig) -> Vec<f64> {
    column
        .iter()
        .map(|&value| preprocess_value(value, config))
        .collect()
}

/// Count missing (NaN) entries in a column.
pub fn count_missing(column: ArrayView1<'_, f64>) -> usize {
    column.iter().filter(|v| v.is_nan()).count()
}
