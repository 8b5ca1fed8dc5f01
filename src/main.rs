//! version-checks - runtime and database version checker CLI
//!
//! Checks the versions of:
//! - the Python interpreter
//! - PostgreSQL and MariaDB/MySQL connections
//! - the SQLite library
//!
//! against PEP 440 ranges declared in a settings file.

use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use version_checks::cli::CliArgs;
use version_checks::orchestrator::Orchestrator;
use version_checks::output::{create_formatter, OutputConfig};
use version_checks::settings::SettingsFile;

/// Exit code when at least one diagnostic was reported
const EXIT_DIAGNOSTICS: u8 = 2;

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("version_checks=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("version_checks=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Handle version flag
    if args.print_version {
        println!("version-checks {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    init_tracing(args.debug);
    tracing::debug!("version-checks starting with args: {:?}", args);

    match run(args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    if args.verbose {
        eprintln!("version-checks v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Settings: {}", args.settings.display());
    }

    let file = SettingsFile::load(&args.settings)?;
    let settings = file.settings();
    let registry = file.registry();
    let runtime = file.runtime(&args.python_bin, &args.sqlite_bin);

    if args.verbose {
        if !settings.is_overridden() {
            eprintln!("No version_checks configured; nothing to check");
        }
        let aliases = registry.aliases();
        if !aliases.is_empty() {
            eprintln!("Connections: {}", aliases.join(", "));
        }
    }

    let output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet);

    let diagnostics = Orchestrator::new(&settings, &runtime, &registry)
        .with_databases(args.database_filter())
        .run_with_progress(output_config.shows_progress())?;

    let formatter = create_formatter(output_config);
    let mut stdout = io::stdout().lock();
    formatter.format(&diagnostics, &mut stdout)?;
    stdout.flush()?;

    if diagnostics.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_DIAGNOSTICS))
    }
}
