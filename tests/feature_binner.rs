//! End-to-end tests for fitting and applying feature binners.

use greedy_binning::*;
use ndarray::{array, Array2};
use tempfile::TempDir;

mod common;
use common::*;

#[test]
fn test_fit_transform_mixed_features() -> anyhow::Result<()> {
    greedy_binning::init();

    let features = create_test_features(2_000, 6, 42);
    let config = BinConfigBuilder::new().max_bin(32).build()?;
    let mut binner = FeatureBinner::new(config)?;
    let binned = binner.fit_transform(&features)?;

    assert_eq!(binned.dim(), features.dim());
    let mappers = binner.bin_mappers()?;
    assert_eq!(mappers.len(), 6);

    for (feature, mapper) in mappers.iter().enumerate() {
        assert_valid_bounds(mapper.bin_upper_bounds());
        assert!(mapper.num_bin() <= 32);
        let max_code = binned.column(feature).iter().copied().max().unwrap();
        assert!((max_code as usize) < mapper.num_bin());
    }

    // low-cardinality column: one bin per category
    assert_eq!(mappers[1].num_bin(), 6);
    Ok(())
}

#[test]
fn test_dominant_value_has_exclusive_bin() -> anyhow::Result<()> {
    let features = create_test_features(1_000, 3, 7);
    let mut binner = FeatureBinner::new(BinConfigBuilder::new().max_bin(16).build()?)?;
    binner.fit(&features)?;

    let mapper = &binner.bin_mappers()?[2];
    let zero_bin = mapper.value_to_bin(0.0);
    let column = features.column(2);
    for &value in column.iter().filter(|&&v| v != 0.0) {
        assert_ne!(mapper.value_to_bin(value), zero_bin, "value {} shares the zero bin", value);
    }
    Ok(())
}

#[test]
fn test_parallel_fit_is_deterministic() -> anyhow::Result<()> {
    let features = create_test_features(500, 9, 11);
    let config = BinConfig::default();

    let mut first = FeatureBinner::new(config.clone())?;
    let mut second = FeatureBinner::new(config)?;
    let a = first.fit_transform(&features)?;
    let b = second.fit_transform(&features)?;

    assert_eq!(a, b);
    assert_eq!(first.bin_mappers()?, second.bin_mappers()?);
    Ok(())
}

#[test]
fn test_quantization_collapses_noise() -> anyhow::Result<()> {
    let features = array![[0.101], [0.104], [0.109], [0.201], [0.205], [0.208]];
    let config = BinConfigBuilder::new()
        .quantization_scale(Some(100.0))
        .build()?;
    let mut binner = FeatureBinner::new(config)?;
    let binned = binner.fit_transform(&features)?;

    let mapper = &binner.bin_mappers()?[0];
    assert_eq!(mapper.bin_upper_bounds(), &[15.0, f64::INFINITY]);
    assert_eq!(binned.column(0).to_vec(), vec![0, 0, 0, 1, 1, 1]);
    Ok(())
}

#[test]
fn test_missing_values_follow_fill_value() -> anyhow::Result<()> {
    let features = Array2::from_shape_vec(
        (8, 1),
        vec![1.0, 1.0, 1.0, 9.0, 9.0, 9.0, f64::NAN, f64::NAN],
    )?;
    let config = BinConfigBuilder::new().missing_fill_value(9.0).build()?;
    let mut binner = FeatureBinner::new(config)?;
    let binned = binner.fit_transform(&features)?;

    assert_eq!(binned[[6, 0]], binned[[3, 0]]);
    assert_eq!(binned[[7, 0]], binned[[3, 0]]);
    assert_ne!(binned[[0, 0]], binned[[3, 0]]);
    Ok(())
}

#[test]
fn test_infinite_values_rejected() -> anyhow::Result<()> {
    let features = array![[1.0], [f64::INFINITY]];
    let mut binner = FeatureBinner::new(BinConfig::default())?;
    let err = binner.fit(&features).unwrap_err();
    assert!(matches!(err, BinningError::InvalidStatistics { .. }));
    assert!(err.to_string().contains("feature 0"));
    Ok(())
}

#[test]
fn test_config_file_round_trip() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let config = BinConfigBuilder::new()
        .max_bin(63)
        .min_data_in_bin(5)
        .quantization_scale(Some(100.0))
        .build()?;

    for name in ["binning.toml", "binning.json"] {
        let path = temp_dir.path().join(name);
        config.save_to_file(&path)?;
        let loaded = BinConfig::load_from_file(&path)?;
        assert_eq!(loaded, config);
    }
    Ok(())
}

#[test]
fn test_partial_toml_uses_defaults() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("binning.toml");
    std::fs::write(&path, "max_bin = 15\n")?;

    let loaded = BinConfig::load_from_file(&path)?;
    assert_eq!(loaded.max_bin, 15);
    assert_eq!(loaded.min_data_in_bin, DEFAULT_MIN_DATA_IN_BIN);
    assert_eq!(loaded.quantization_scale, None);
    Ok(())
}

#[test]
fn test_invalid_config_file_rejected() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("binning.json");
    std::fs::write(&path, r#"{"max_bin": 0}"#)?;

    assert!(BinConfig::load_from_file(&path).is_err());
    assert!(BinConfig::load_from_file(temp_dir.path().join("missing.toml")).is_err());
    Ok(())
}

#[test]
fn test_binner_save_and_load() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("binner.json");

    let features = create_test_features(300, 3, 5);
    let mut binner = FeatureBinner::new(BinConfig::default())?;
    let expected = binner.fit_transform(&features)?;
    binner.save_to_file(&path)?;

    let restored = FeatureBinner::load_from_file(&path)?;
    assert!(restored.is_fitted());
    assert_eq!(restored.transform(&features)?, expected);
    Ok(())
}
