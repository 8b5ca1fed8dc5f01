//! CLI argument parsing module for version-checks

use crate::probe::{DEFAULT_PYTHON_BIN, DEFAULT_SQLITE_BIN};
use crate::settings::DEFAULT_SETTINGS_FILE;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Check runtime and database versions against configured ranges
#[derive(Parser, Debug, Clone)]
#[command(
    name = "version-checks",
    about = "Check Python and database engine versions against PEP 440 ranges",
    disable_version_flag = true
)]
pub struct CliArgs {
    /// Settings file (.toml or .json)
    #[arg(default_value = DEFAULT_SETTINGS_FILE)]
    pub settings: PathBuf,

    // Check filters
    /// Check only this database alias (can be specified multiple times)
    #[arg(long = "database", action = ArgAction::Append)]
    pub databases: Vec<String>,

    // Probes
    /// Python interpreter used when no runtime version is declared
    #[arg(long, default_value = DEFAULT_PYTHON_BIN)]
    pub python_bin: String,

    /// SQLite shell used when no runtime version is declared
    #[arg(long, default_value = DEFAULT_SQLITE_BIN)]
    pub sqlite_bin: String,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - diagnostics only
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Print version
    #[arg(short = 'V', long = "version")]
    pub print_version: bool,
}

impl CliArgs {
    /// The checked database set; `None` when no `--database` was given
    pub fn database_filter(&self) -> Option<&[String]> {
        if self.databases.is_empty() {
            None
        } else {
            Some(&self.databases)
        }
    }
}
