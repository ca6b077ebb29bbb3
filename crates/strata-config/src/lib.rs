//! Construction parameters for strata skip lists.
//!
//! A [`SkipListConfig`] carries the level cap, the promotion probability, an
//! optional seed and optional logging settings. Files are read as JSON or
//! YAML depending on their extension and validated on load.

use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use strata_logging::LoggingConfig;
use thiserror::Error;

/// Level cap used when none is configured.
pub const DEFAULT_MAX_LEVEL: usize = 16;

/// Promotion probability used when none is configured.
pub const DEFAULT_PROBABILITY: f64 = 0.5;

/// Largest accepted level cap. With `p = 0.5` this covers far more
/// elements than fit in memory.
pub const MAX_LEVEL_CEILING: usize = 64;

/// Rejected construction parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("max level {0} exceeds the ceiling of {MAX_LEVEL_CEILING}")]
    MaxLevelTooLarge(usize),
    #[error("level probability must lie strictly between 0 and 1, got {0}")]
    InvalidProbability(f64),
}

/// Check a level cap and promotion probability.
///
/// A cap of `0` is accepted: every node then lives on the base level only.
pub fn validate_params(max_level: usize, probability: f64) -> Result<(), ConfigError> {
    if max_level > MAX_LEVEL_CEILING {
        return Err(ConfigError::MaxLevelTooLarge(max_level));
    }
    // Written so that NaN fails too.
    if !(probability > 0.0 && probability < 1.0) {
        return Err(ConfigError::InvalidProbability(probability));
    }
    Ok(())
}

/// Configuration format types supported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl Default for ConfigFormat {
    fn default() -> Self {
        Self::Yaml
    }
}

impl ConfigFormat {
    /// Pick a format from a file extension; anything unknown is YAML.
    pub fn from_path(path: &std::path::Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Yaml,
        }
    }
}

/// Skip list construction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkipListConfig {
    /// Highest level index a node may reach
    #[serde(default = "default_max_level")]
    pub max_level: usize,

    /// Probability of promoting a node one more level
    #[serde(default = "default_probability")]
    pub probability: f64,

    /// Seed for reproducible level draws; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Operation log settings; no log when absent
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

fn default_max_level() -> usize {
    DEFAULT_MAX_LEVEL
}

fn default_probability() -> f64 {
    DEFAULT_PROBABILITY
}

impl Default for SkipListConfig {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            probability: DEFAULT_PROBABILITY,
            seed: None,
            logging: None,
        }
    }
}

impl SkipListConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    /// Check the level cap and probability.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_params(self.max_level, self.probability)
    }
}

/// Parse and validate configuration text
pub fn parse_config(contents: &str, format: ConfigFormat) -> anyhow::Result<SkipListConfig> {
    let config: SkipListConfig = match format {
        ConfigFormat::Json => {
            serde_json::from_str(contents).context("Failed to parse JSON config")?
        }
        ConfigFormat::Yaml => {
            serde_yaml::from_str(contents).context("Failed to parse YAML config")?
        }
    };
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
pub fn load_config<P: Into<PathBuf>>(path: P) -> anyhow::Result<SkipListConfig> {
    let path = path.into();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;

    parse_config(&contents, ConfigFormat::from_path(&path))
        .with_context(|| format!("Invalid config {}", path.display()))
}

/// Save configuration to a file
pub fn save_config<P: Into<PathBuf>>(config: &SkipListConfig, path: P) -> anyhow::Result<()> {
    let path = path.into();
    let contents = match ConfigFormat::from_path(&path) {
        ConfigFormat::Json => {
            serde_json::to_string_pretty(config).context("Failed to serialize JSON config")?
        }
        ConfigFormat::Yaml => {
            serde_yaml::to_string(config).context("Failed to serialize YAML config")?
        }
    };

    std::fs::write(&path, contents)
        .with_context(|| format!("Failed to write config {}", path.display()))?;
    Ok(())
}
