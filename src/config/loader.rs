//! Configuration loading and merging logic
//!
//! Handles loading configuration from multiple sources and merging them
//! according to precedence rules.

use super::{
    defaults, paths,
    schema::{Config, LoggerConfig, OutputConfig},
};
use anyhow::{Context, Result};
use std::path::Path;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers merged
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Config file (`path`, or the root config when `None`)
    /// 3. Built-in defaults
    ///
    /// A missing root config falls back to defaults; a missing explicit path
    /// is an error.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let mut config = Self::load_defaults();

        match path {
            Some(path) => {
                config = Self::merge_config(config, Self::load_file(path)?);
            }
            None => {
                let root = paths::root_config_path();
                if root.exists() {
                    config = Self::merge_config(config, Self::load_file(&root)?);
                }
            }
        }

        Ok(Self::apply_env_overrides(config))
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration by loading and checking for errors
    ///
    /// Fails on invalid YAML, invalid value types, blank ignore rules and
    /// file read errors.
    pub fn validate(path: Option<&Path>) -> Result<()> {
        let config = Self::load(path).context("Failed to load merged configuration")?;

        if let Some(position) = config.ignore_fields.iter().position(|f| f.trim().is_empty()) {
            return Err(anyhow::anyhow!(
                "ignoreFields[{}] is empty; remove it or give it a field path",
                position
            ));
        }

        if config.output.max_details == 0 {
            return Err(anyhow::anyhow!("output.maxDetails must be at least 1"));
        }

        Ok(())
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        defaults::default_config()
    }

    /// Merge two configurations, with `other` taking precedence
    fn merge_config(_base: Config, other: Config) -> Config {
        Config {
            ignore_fields: other.ignore_fields.clone(),
            output: OutputConfig {
                format: other.output.format,
                include_identical: other.output.include_identical,
                max_details: other.output.max_details,
            },
            logger: LoggerConfig {
                level: other.logger.level.clone(),
            },
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: Config) -> Config {
        // NSDIFF_OUTPUT_FORMAT override
        if let Ok(format) = std::env::var("NSDIFF_OUTPUT_FORMAT") {
            match format.parse() {
                Ok(format) => config.output.format = format,
                Err(e) => tracing::warn!("Ignoring NSDIFF_OUTPUT_FORMAT: {}", e),
            }
        }

        // NSDIFF_IGNORE_FIELDS appends comma-separated rules
        if let Ok(fields) = std::env::var("NSDIFF_IGNORE_FIELDS") {
            for field in fields.split(',').map(str::trim).filter(|f| !f.is_empty()) {
                if !config.ignore_fields.iter().any(|existing| existing == field) {
                    config.ignore_fields.push(field.to_string());
                }
            }
        }

        // NSDIFF_LOG_LEVEL override
        if let Ok(level) = std::env::var("NSDIFF_LOG_LEVEL") {
            config.logger.level = level;
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Save to `path`, or the root config when `None`
    pub fn save_to(config: &Config, path: Option<&Path>) -> Result<()> {
        match path {
            Some(path) => Self::save(config, path),
            None => Self::save(config, &paths::root_config_path()),
        }
    }
}
