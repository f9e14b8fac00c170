//! Integration tests for layered configuration
//!
//! These tests verify that configuration loading follows the correct precedence:
//! CLI arguments > Environment variables > Config file > Defaults

use embedlens_core::config::{CliConfigOverrides, ConfigSource, SessionConfig};
use embedlens_core::error::EmbedlensError;
use embedlens_core::models::ColoringStrategy;
use serial_test::serial;
use std::env;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn clear_env() {
    env::remove_var("EMBEDLENS_METADATA_BATCH_SIZE");
    env::remove_var("EMBEDLENS_DEFAULT_STRATEGY");
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env();
    env::set_var("EMBEDLENS_METADATA_BATCH_SIZE", "64");
    env::set_var("EMBEDLENS_DEFAULT_STRATEGY", "dimension");

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
metadata_batch_size = 250
default_strategy = "Correctness"
"#
    )
    .unwrap();

    let config = SessionConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    // Environment should override file
    assert_eq!(config.metadata_batch_size.value, 64);
    assert_eq!(config.metadata_batch_size.source, ConfigSource::Environment);
    assert_eq!(config.default_strategy.value, ColoringStrategy::Dimension);
    assert_eq!(config.default_strategy.source, ConfigSource::Environment);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_environment_values_keep_lower_layers() {
    clear_env();
    env::set_var("EMBEDLENS_METADATA_BATCH_SIZE", "not-a-number");
    env::set_var("EMBEDLENS_DEFAULT_STRATEGY", "rainbow");

    let config = SessionConfig::with_defaults().load_from_env();

    // Unparseable values are warned about and dropped, not applied
    assert_eq!(config.metadata_batch_size.value, 500);
    assert_eq!(config.metadata_batch_size.source, ConfigSource::Default);
    assert_eq!(config.default_strategy.value, ColoringStrategy::Dataset);
    assert_eq!(config.default_strategy.source, ConfigSource::Default);

    // Zero is rejected too: a batch size must be positive
    env::set_var("EMBEDLENS_METADATA_BATCH_SIZE", "0");
    let config = SessionConfig::with_defaults().load_from_env();
    assert_eq!(config.metadata_batch_size.value, 500);
    assert_eq!(config.metadata_batch_size.source, ConfigSource::Default);

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_environment() {
    clear_env();
    env::set_var("EMBEDLENS_METADATA_BATCH_SIZE", "64");

    let mut config = SessionConfig::with_defaults().load_from_env();
    assert_eq!(config.metadata_batch_size.source, ConfigSource::Environment);

    config.update_from_cli(CliConfigOverrides {
        metadata_batch_size: Some(1000),
        ..Default::default()
    });

    assert_eq!(config.metadata_batch_size.value, 1000);
    assert_eq!(config.metadata_batch_size.source, ConfigSource::Cli);
    assert!(ConfigSource::Cli.precedence() > ConfigSource::Environment.precedence());

    clear_env();
}

#[test]
#[serial]
fn test_full_configuration_workflow() {
    // Defaults, then file, then environment, then CLI
    clear_env();
    env::set_var("EMBEDLENS_DEFAULT_STRATEGY", "correctness");

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
metadata_batch_size = 250
default_strategy = "Dimension"
"#
    )
    .unwrap();

    let mut config = SessionConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    assert_eq!(config.metadata_batch_size.value, 250); // From file
    assert_eq!(config.metadata_batch_size.source, ConfigSource::File);
    assert_eq!(config.default_strategy.value, ColoringStrategy::Correctness); // From env
    assert_eq!(config.default_strategy.source, ConfigSource::Environment);

    config.update_from_cli(CliConfigOverrides {
        default_strategy: Some(ColoringStrategy::Dataset),
        ..Default::default()
    });

    assert_eq!(config.default_strategy.value, ColoringStrategy::Dataset);
    assert_eq!(config.default_strategy.source, ConfigSource::Cli);
    assert_eq!(config.metadata_batch_size.source, ConfigSource::File); // Untouched

    clear_env();
}

#[test]
fn test_missing_config_file_is_an_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let non_existent = temp_dir.path().join("does_not_exist.toml");

    let result = SessionConfig::with_defaults().load_from_file(&non_existent);

    assert!(matches!(result, Err(EmbedlensError::Io(_))));
}

#[test]
fn test_invalid_toml_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "invalid toml content [[[").unwrap();

    let result = SessionConfig::with_defaults().load_from_file(file.path());

    assert!(matches!(result, Err(EmbedlensError::ConfigInvalid { .. })));
}
