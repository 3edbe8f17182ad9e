//! CLI command handling module
//!
//! Handles all CLI subcommands and argument parsing.

mod config;
mod diff;
mod logging;
mod version;

pub use config::{ConfigSubcommand, IgnoreSubcommand, handle_config_command, handle_ignore_command};
pub use diff::{CompareArgs, ReconcileArgs, handle_compare, handle_flatten, handle_reconcile};
pub use logging::*;
pub use version::display_version;
