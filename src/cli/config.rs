//! Configuration and ignore-rule command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::Path;

use nsdiff::config::{self, ConfigLoader, paths};

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get configuration value
    Get {
        /// Configuration key (e.g., "output.format", "ignoreFields")
        key: Option<String>,
    },
    /// Set configuration value
    Set {
        /// Configuration key (e.g., "output.format", "ignoreFields")
        key: String,
        /// Configuration value
        value: String,
    },
    /// List all configuration
    List,
    /// Show configuration file path
    Path,
    /// Validate configuration
    Validate,
}

/// Ignore rule subcommands
#[derive(Subcommand, Debug)]
pub enum IgnoreSubcommand {
    /// List active ignore rules
    List,
    /// Add a custom ignore rule
    Add {
        /// Field path prefix (e.g., "metadata.annotations")
        path: String,
    },
    /// Remove a custom ignore rule
    Remove {
        /// Field path prefix
        path: String,
    },
}

/// Handle configuration subcommands
pub fn handle_config_command(cmd: ConfigSubcommand, config_path: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigSubcommand::Get { key } => {
            let config = ConfigLoader::load(config_path).context("Failed to load configuration")?;

            if let Some(key) = key {
                let value = config::get_config_value(&config, &key)?;
                println!("{}", value.trim_end());
            } else {
                let yaml =
                    serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
                print!("{}", yaml);
            }
        }
        ConfigSubcommand::Set { key, value } => {
            let mut config = load_for_update(config_path).context("Failed to load configuration")?;

            config::set_config_value(&mut config, &key, &value)
                .with_context(|| format!("Failed to set {} = {}", key, value))?;

            ConfigLoader::save_to(&config, config_path).context("Failed to save configuration")?;
            println!("Configuration saved");
        }
        ConfigSubcommand::List => {
            let config = ConfigLoader::load(config_path).context("Failed to load configuration")?;
            let yaml =
                serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
            print!("{}", yaml);
        }
        ConfigSubcommand::Path => {
            let path = config_path
                .map(Path::to_path_buf)
                .unwrap_or_else(paths::root_config_path);
            println!("{}", path.display());
        }
        ConfigSubcommand::Validate => match ConfigLoader::validate(config_path) {
            Ok(()) => {
                println!("Configuration is valid");
            }
            Err(e) => {
                eprintln!("Configuration validation failed: {:#}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

/// Handle ignore rule subcommands
pub fn handle_ignore_command(cmd: IgnoreSubcommand, config_path: Option<&Path>) -> Result<()> {
    match cmd {
        IgnoreSubcommand::List => {
            let config = ConfigLoader::load(config_path).context("Failed to load configuration")?;
            for rule in config.ignore_rules().iter() {
                println!("{}", rule);
            }
        }
        IgnoreSubcommand::Add { path } => {
            let mut config = load_for_update(config_path).context("Failed to load configuration")?;
            let mut rules = config.ignore_rules();

            if rules.add_custom(&path)? {
                config.ignore_fields = rules.custom_paths();
                ConfigLoader::save_to(&config, config_path)
                    .context("Failed to save configuration")?;
                println!("Added ignore rule: {}", path.trim());
            } else {
                println!("Ignore rule already active: {}", path.trim());
            }
        }
        IgnoreSubcommand::Remove { path } => {
            let mut config = load_for_update(config_path).context("Failed to load configuration")?;
            let mut rules = config.ignore_rules();

            let removed = rules
                .remove(&path)
                .with_context(|| format!("Cannot remove ignore rule '{}'", path))?;
            config.ignore_fields = rules.custom_paths();
            ConfigLoader::save_to(&config, config_path).context("Failed to save configuration")?;
            println!("Removed ignore rule: {}", removed.path());
        }
    }

    Ok(())
}

/// Load only the file layer so environment overrides are not written back
///
/// A config file that does not exist yet starts from defaults; one that exists
/// but cannot be read or parsed is an error so it is never overwritten.
fn load_for_update(config_path: Option<&Path>) -> Result<config::Config> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(paths::root_config_path);
    if path.exists() {
        ConfigLoader::load_file(&path)
    } else {
        Ok(ConfigLoader::load_defaults())
    }
}
