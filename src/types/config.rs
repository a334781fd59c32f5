//! Configuration for flowwatch.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::detection::{PathThresholds, RiskThresholds};
use crate::types::errors::FlowWatchError;
use crate::FlowWatchResult;

/// Default config file name.
pub const DEFAULT_CONFIG_FILE: &str = "flowwatch.toml";

/// Main configuration for flowwatch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Result cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Detection rule thresholds.
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Trace sink settings.
    #[serde(default)]
    pub trace: TraceConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format.
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Output format for the log subscriber.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Result cache settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// Number of most recent verdicts kept.
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
        }
    }
}

fn default_cache_capacity() -> usize {
    crate::cache::DEFAULT_CAPACITY
}

/// Detection rule thresholds.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DetectionConfig {
    /// Path obfuscation thresholds.
    #[serde(default)]
    pub path: PathThresholds,

    /// Density risk thresholds.
    #[serde(default)]
    pub risk: RiskThresholds,
}

/// Trace sink settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TraceConfig {
    /// Register the logging sink.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> FlowWatchResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> FlowWatchResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Creates default configuration.
    pub fn default_config() -> Self {
        Self {
            general: GeneralConfig::default(),
            cache: CacheConfig::default(),
            detection: DetectionConfig::default(),
            trace: TraceConfig::default(),
        }
    }

    /// Checks values that serde cannot reject on its own.
    pub fn validate(&self) -> FlowWatchResult<()> {
        if self.cache.capacity == 0 {
            return Err(FlowWatchError::config("cache.capacity must be at least 1"));
        }
        if self.detection.path.unknown_marker.trim().is_empty() {
            return Err(FlowWatchError::config(
                "detection.path.unknown_marker must not be empty",
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
