//! Binning configuration structure and builder.
//!
//! [`BinConfig`] carries the parameters of the greedy bin-boundary heuristic
//! together with the value preprocessing applied before distinct values are
//! counted. It can be built in code through [`BinConfigBuilder`] or loaded
//! from a `.json` / `.toml` file.

use crate::core::constants::*;
use crate::core::error::{BinningError, Result};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Configuration for feature binning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinConfig {
    /// Maximum number of bins for feature discretization
    pub max_bin: usize,
    /// Minimum number of samples a bin should collect before it is closed
    pub min_data_in_bin: usize,
    /// Maximum bins for each feature (if None, use max_bin for all)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bin_by_feature: Option<Vec<usize>>,
    /// Value substituted for NaN before counting and mapping
    pub missing_fill_value: f64,
    /// When set, every value `v` is replaced by `floor(v * scale)` before binning
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantization_scale: Option<f64>,
}

impl Default for BinConfig {
    fn default() -> Self {
        BinConfig {
            max_bin: DEFAULT_MAX_BIN,
            min_data_in_bin: DEFAULT_MIN_DATA_IN_BIN,
            max_bin_by_feature: None,
            missing_fill_value: DEFAULT_MISSING_FILL_VALUE,
            quantization_scale: None,
        }
    }
}

impl BinConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<()> {
        validate_max_bin("max_bin", self.max_bin)?;

        if let Some(ref per_feature) = self.max_bin_by_feature {
            for &max_bin in per_feature {
                validate_max_bin("max_bin_by_feature", max_bin)?;
            }
        }

        if !self.missing_fill_value.is_finite() {
            return Err(BinningError::invalid_parameter(
                "missing_fill_value",
                self.missing_fill_value.to_string(),
                "must be a finite number",
            ));
        }

        if let Some(scale) = self.quantization_scale {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(BinningError::invalid_parameter(
                    "quantization_scale",
                    scale.to_string(),
                    "must be a positive finite number",
                ));
            }
        }

        Ok(())
    }

    /// Maximum bin count for the given feature, honoring `max_bin_by_feature`.
    pub fn max_bin_for_feature(&self, feature: usize) -> usize {
        self.max_bin_by_feature
            .as_ref()
            .and_then(|per_feature| per_feature.get(feature).copied())
            .unwrap_or(self.max_bin)
    }

    /// Load configuration from a `.json` or `.toml` file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let config: BinConfig = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content).map_err(|e| {
                BinningError::config(format!("Failed to parse TOML config: {}", e))
            })?,
            _ => {
                return Err(BinningError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        config.validate()?;
        log::debug!("Loaded binning config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a `.json` or `.toml` file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self).map_err(|e| {
                BinningError::config(format!("Failed to serialize to TOML: {}", e))
            })?,
            _ => {
                return Err(BinningError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Build a configuration from LightGBM-style `key=value` parameters.
    ///
    /// Unknown keys are logged and ignored.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self> {
        let mut builder = BinConfigBuilder::new();

        for (key, value) in params {
            match key.as_str() {
                "max_bin" => builder = builder.max_bin(parse_param(key, value)?),
                "min_data_in_bin" => builder = builder.min_data_in_bin(parse_param(key, value)?),
                "missing_fill_value" => {
                    builder = builder.missing_fill_value(parse_param(key, value)?)
                }
                "quantization_scale" => {
                    builder = builder.quantization_scale(Some(parse_param(key, value)?))
                }
                "max_bin_by_feature" => {
                    let per_feature = value
                        .split(',')
                        .map(|item| parse_param(key, item.trim()))
                        .collect::<Result<Vec<usize>>>()?;
                    builder = builder.max_bin_by_feature(Some(per_feature));
                }
                _ => log::warn!("Unknown binning parameter: {}", key),
            }
        }

        builder.build()
    }
}

fn validate_max_bin(parameter: &str, max_bin: usize) -> Result<()> {
    if max_bin == 0 || max_bin > MAX_SUPPORTED_BIN {
        return Err(BinningError::invalid_parameter(
            parameter,
            max_bin.to_string(),
            format!("must be in range [1, {}]", MAX_SUPPORTED_BIN),
        ));
    }
    Ok(())
}

fn parse_param<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_| BinningError::config(format!("Invalid {}: {}", key, value)))
}

/// Builder for [`BinConfig`] that collects validation errors until `build`.
#[derive(Debug, Clone)]
pub struct BinConfigBuilder {
    config: BinConfig,
    validation_errors: Vec<String>,
}

impl BinConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        BinConfigBuilder {
            config: BinConfig::default(),
            validation_errors: Vec::new(),
        }
    }

    /// Set maximum number of bins
    pub fn max_bin(mut self, max_bin: usize) -> Self {
        if max_bin == 0 {
            self.validation_errors
                .push("max_bin must be at least 1".to_string());
        }
        self.config.max_bin = max_bin;
        self
    }

    /// Set minimum number of samples per bin
    pub fn min_data_in_bin(mut self, min_data_in_bin: usize) -> Self {
        self.config.min_data_in_bin = min_data_in_bin;
        self
    }

    /// Set per-feature maximum bin counts
    pub fn max_bin_by_feature(mut self, max_bin_by_feature: Option<Vec<usize>>) -> Self {
        if let Some(ref per_feature) = max_bin_by_feature {
            if per_feature.iter().any(|&max_bin| max_bin == 0) {
                self.validation_errors
                    .push("max_bin_by_feature entries must be at least 1".to_string());
            }
        }
        self.config.max_bin_by_feature = max_bin_by_feature;
        self
    }

    /// Set the replacement value for missing entries
    pub fn missing_fill_value(mut self, value: f64) -> Self {
        if !value.is_finite() {
            self.validation_errors
                .push("missing_fill_value must be finite".to_string());
        }
        self.config.missing_fill_value = value;
        self
    }

    /// Set the quantization scale applied before counting
    pub fn quantization_scale(mut self, scale: Option<f64>) -> Self {
        if let Some(scale) = scale {
            if !scale.is_finite() || scale <= 0.0 {
                self.validation_errors
                    .push("quantization_scale must be positive and finite".to_string());
            }
        }
        self.config.quantization_scale = scale;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<BinConfig> {
        if !self.validation_errors.is_empty() {
            return Err(BinningError::config(format!(
                "Configuration validation failed: {}",
                self.validation_errors.join(", ")
            )));
        }

        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for BinConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
