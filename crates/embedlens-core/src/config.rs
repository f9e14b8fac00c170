use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

use crate::error::{EmbedlensError, Result};
use crate::models::ColoringStrategy;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for a point-cloud session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Maximum number of point ids per metadata fetch call
    pub metadata_batch_size: ConfigValue<usize>,
    /// Coloring strategy a fresh session starts with
    pub default_strategy: ConfigValue<ColoringStrategy>,
}

impl SessionConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            metadata_batch_size: ConfigValue::new(500, ConfigSource::Default),
            default_strategy: ConfigValue::new(ColoringStrategy::Dataset, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| EmbedlensError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(batch_size) = file_config.metadata_batch_size {
            self.metadata_batch_size.update(batch_size, ConfigSource::File);
        }

        if let Some(strategy) = file_config.default_strategy {
            self.default_strategy.update(strategy, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // EMBEDLENS_METADATA_BATCH_SIZE
        if let Ok(batch_str) = env::var("EMBEDLENS_METADATA_BATCH_SIZE") {
            match batch_str.parse::<usize>() {
                Ok(batch_size) if batch_size > 0 => {
                    self.metadata_batch_size.update(batch_size, ConfigSource::Environment)
                }
                _ => tracing::warn!(
                    "Invalid EMBEDLENS_METADATA_BATCH_SIZE value '{}': expected positive integer",
                    batch_str
                ),
            }
        }

        // EMBEDLENS_DEFAULT_STRATEGY
        if let Ok(strategy_str) = env::var("EMBEDLENS_DEFAULT_STRATEGY") {
            match parse_strategy(&strategy_str) {
                Ok(strategy) => self.default_strategy.update(strategy, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid EMBEDLENS_DEFAULT_STRATEGY value '{}': expected dataset, correctness, or dimension",
                    strategy_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(batch_size) = overrides.metadata_batch_size {
            self.metadata_batch_size.update(batch_size, ConfigSource::Cli);
        }

        if let Some(strategy) = overrides.default_strategy {
            self.default_strategy.update(strategy, ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "metadata_batch_size".to_string(),
            (self.metadata_batch_size.value.to_string(), self.metadata_batch_size.source),
        );

        map.insert(
            "default_strategy".to_string(),
            (format!("{:?}", self.default_strategy.value), self.default_strategy.source),
        );

        map
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    metadata_batch_size: Option<usize>,
    default_strategy: Option<ColoringStrategy>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub metadata_batch_size: Option<usize>,
    pub default_strategy: Option<ColoringStrategy>,
}

/// Parse a coloring strategy from string
pub fn parse_strategy(s: &str) -> Result<ColoringStrategy> {
    match s.to_lowercase().as_str() {
        "dataset" => Ok(ColoringStrategy::Dataset),
        "correctness" => Ok(ColoringStrategy::Correctness),
        "dimension" => Ok(ColoringStrategy::Dimension),
        _ => Err(EmbedlensError::ConfigInvalid {
            key: "default_strategy".to_string(),
            reason: format!("Invalid strategy: {}. Use dataset, correctness, or dimension", s),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::with_defaults();
        assert_eq!(config.metadata_batch_size.value, 500);
        assert_eq!(config.metadata_batch_size.source, ConfigSource::Default);
        assert_eq!(config.default_strategy.value, ColoringStrategy::Dataset);
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        // File should override default
        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        // Environment should override file
        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);

        // CLI should override environment
        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
metadata_batch_size = 250
default_strategy = "Correctness"
"#
        )
        .unwrap();

        let config = SessionConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.metadata_batch_size.value, 250);
        assert_eq!(config.metadata_batch_size.source, ConfigSource::File);
        assert_eq!(config.default_strategy.value, ColoringStrategy::Correctness);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = SessionConfig::with_defaults();

        let overrides = CliConfigOverrides {
            metadata_batch_size: Some(1000),
            default_strategy: None,
        };

        config.update_from_cli(overrides);

        assert_eq!(config.metadata_batch_size.value, 1000);
        assert_eq!(config.metadata_batch_size.source, ConfigSource::Cli);
        // Untouched value keeps its default
        assert_eq!(config.default_strategy.source, ConfigSource::Default);
    }

    #[test]
    fn test_parse_strategy() {
        assert_eq!(parse_strategy("dataset").unwrap(), ColoringStrategy::Dataset);
        assert_eq!(parse_strategy("CORRECTNESS").unwrap(), ColoringStrategy::Correctness);
        assert_eq!(parse_strategy("dimension").unwrap(), ColoringStrategy::Dimension);
        assert!(parse_strategy("invalid").is_err());
    }

    #[test]
    fn test_inspection_map() {
        let config = SessionConfig::with_defaults();
        let map = config.to_inspection_map();

        assert!(map.contains_key("metadata_batch_size"));
        assert!(map.contains_key("default_strategy"));

        let (batch_value, batch_source) = &map["metadata_batch_size"];
        assert_eq!(batch_value, "500");
        assert_eq!(*batch_source, ConfigSource::Default);
    }
}
