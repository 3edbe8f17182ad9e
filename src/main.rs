//! nsdiff - compare Kubernetes manifests across namespaces
//!
//! Flattens manifests, compares every target namespace against a baseline and
//! reports per-object statuses with a summary.

mod cli;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cli::{CompareArgs, ConfigSubcommand, IgnoreSubcommand, ReconcileArgs};
use nsdiff::config::ConfigLoader;

/// nsdiff - compare Kubernetes manifests across namespaces
#[derive(Parser, Debug)]
#[command(name = "nsdiff")]
#[command(about = "Compare Kubernetes manifests across namespaces field by field", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Print the flattened field map of every manifest
    Flatten {
        /// Manifest files (YAML, multi-document or List)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Compare target manifests against a baseline
    Compare(CompareArgs),
    /// Reconcile and summarise a comparison payload
    Reconcile(ReconcileArgs),
    /// Ignore rule management
    Ignore {
        #[command(subcommand)]
        subcommand: IgnoreSubcommand,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config.as_deref();

    // Config commands must work even when the config file is broken
    match args.command {
        Command::Config { subcommand } => {
            return cli::handle_config_command(subcommand, config_path);
        }
        Command::Version => {
            cli::display_version();
            return Ok(());
        }
        _ => {}
    }

    let config = ConfigLoader::load(config_path).context("Failed to load configuration")?;
    cli::init_logging(args.debug, args.log_file.as_deref(), &config.logger.level)?;
    tracing::debug!("Configuration loaded: {:?}", config);

    let all_ok = match args.command {
        Command::Flatten { files } => {
            cli::handle_flatten(&files)?;
            true
        }
        Command::Compare(compare) => cli::handle_compare(compare, &config)?,
        Command::Reconcile(reconcile) => cli::handle_reconcile(reconcile, &config)?,
        Command::Ignore { subcommand } => {
            cli::handle_ignore_command(subcommand, config_path)?;
            true
        }
        Command::Config { .. } | Command::Version => true,
    };

    if !all_ok {
        std::process::exit(1);
    }

    Ok(())
}
