//! Configuration management for greedy binning.

pub mod core;

pub use self::core::{BinConfig, BinConfigBuilder};
