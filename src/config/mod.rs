//! Configuration system for nsdiff
//!
//! Layered configuration (defaults, config file, environment) controlling
//! custom ignore rules, report output and logging.

mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{Config, LoggerConfig, OutputConfig, OutputFormat};

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &Config, key: &str) -> anyhow::Result<String> {
    match key {
        "ignoreFields" => serde_yaml::to_string(&config.ignore_fields)
            .map_err(|e| anyhow::anyhow!("Failed to serialize ignoreFields: {}", e)),
        "output.format" => Ok(config.output.format.to_string()),
        "output.includeIdentical" => Ok(config.output.include_identical.to_string()),
        "output.maxDetails" => Ok(config.output.max_details.to_string()),
        "logger.level" => Ok(config.logger.level.clone()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key (dot notation)
pub fn set_config_value(config: &mut Config, key: &str, value: &str) -> anyhow::Result<()> {
    use anyhow::Context;
    match key {
        "ignoreFields" => {
            // Parse as YAML array or comma-separated list
            let fields: Vec<String> = if value.trim_start().starts_with('[') {
                serde_yaml::from_str(value).context(
                    "ignoreFields must be a YAML array (e.g., ['metadata.labels', 'spec.replicas'])",
                )?
            } else {
                value
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            };
            config.ignore_fields = fields;
        }
        "output.format" => {
            config.output.format = value
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))
                .context("output.format must be 'text', 'yaml' or 'json'")?;
        }
        "output.includeIdentical" => {
            config.output.include_identical = value
                .parse()
                .context("output.includeIdentical must be 'true' or 'false'")?;
        }
        "output.maxDetails" => {
            let max: usize = value
                .parse()
                .context("output.maxDetails must be a number")?;
            if max == 0 {
                return Err(anyhow::anyhow!("output.maxDetails must be at least 1"));
            }
            config.output.max_details = max;
        }
        "logger.level" => {
            config.logger.level = value.to_string();
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}

/// All configuration keys understood by get/set
pub const CONFIG_KEYS: &[&str] = &[
    "ignoreFields",
    "output.format",
    "output.includeIdentical",
    "output.maxDetails",
    "logger.level",
];
