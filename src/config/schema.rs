//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use crate::ignore::IgnoreRules;
use crate::report::RenderOptions;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Custom ignore rules, applied on top of the built-in defaults
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore_fields: Vec<String>,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    /// Report format
    #[serde(default)]
    pub format: OutputFormat,

    /// Show objects that match the baseline in text output
    #[serde(default = "default_true")]
    pub include_identical: bool,

    /// Detail lines shown per namespace in text output
    #[serde(default = "default_max_details")]
    pub max_details: usize,
}

/// Logger configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoggerConfig {
    /// Filter directive used when neither RUST_LOG nor --debug is set
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Report output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Yaml,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

impl Config {
    /// Built-in defaults plus the configured custom rules
    pub fn ignore_rules(&self) -> IgnoreRules {
        IgnoreRules::with_custom(&self.ignore_fields)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            include_identical: self.output.include_identical,
            max_details: self.output.max_details,
        }
    }
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_max_details() -> usize {
    20
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignore_fields: Vec::new(),
            output: OutputConfig::default(),
            logger: LoggerConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            include_identical: default_true(),
            max_details: default_max_details(),
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert!(config.ignore_fields.is_empty());
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.output.include_identical);
        assert_eq!(config.logger.level, "warn");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("includeIdentical"));
        assert!(yaml.contains("maxDetails"));
        assert!(!yaml.contains("ignoreFields"));
    }

    #[test]
    fn test_config_deserialization() {
        let yaml = r#"
ignoreFields:
  - metadata.annotations
output:
  format: json
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.max_details, 20);
        assert!(config.ignore_rules().is_ignored("metadata.annotations.team"));
        assert!(config.ignore_rules().is_ignored("status.phase"));
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("YML".parse::<OutputFormat>(), Ok(OutputFormat::Yaml));
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
