//! Orchestrator for running every version check
//!
//! This module provides:
//! - Workflow coordination: validate the override → run each target check
//! - The checked database set (all registry aliases unless narrowed)
//! - Progress display while versions are probed

use crate::checks::{
    check_config, check_mysql_version, check_postgresql_version, check_python_version,
    check_sqlite_version,
};
use crate::domain::{Diagnostic, Target};
use crate::error::ProbeError;
use crate::probe::{ConnectionRegistry, RuntimeProbe};
use crate::progress::Progress;
use crate::settings::Settings;
use tracing::{debug, info};

/// Run the configuration check, then every target check in order
///
/// A misconfigured override is reported on its own; no target is checked.
/// `databases` narrows the checked connections; `None` checks every alias
/// known to the registry.
pub fn run_checks(
    settings: &Settings,
    runtime: &dyn RuntimeProbe,
    registry: &ConnectionRegistry,
    databases: Option<&[String]>,
) -> Result<Vec<Diagnostic>, ProbeError> {
    Orchestrator::new(settings, runtime, registry)
        .with_databases(databases)
        .run()
}

/// Orchestrator for the check workflow
pub struct Orchestrator<'a> {
    /// The `version_checks` override
    settings: &'a Settings,
    /// Source of runtime versions
    runtime: &'a dyn RuntimeProbe,
    /// Known database connections
    registry: &'a ConnectionRegistry,
    /// Aliases to check; `None` means all
    databases: Option<&'a [String]>,
}

impl<'a> Orchestrator<'a> {
    /// Create an orchestrator checking every known connection
    pub fn new(
        settings: &'a Settings,
        runtime: &'a dyn RuntimeProbe,
        registry: &'a ConnectionRegistry,
    ) -> Self {
        Self {
            settings,
            runtime,
            registry,
            databases: None,
        }
    }

    /// Restrict the database checks to the given aliases
    pub fn with_databases(mut self, databases: Option<&'a [String]>) -> Self {
        self.databases = databases;
        self
    }

    /// Run the check workflow
    pub fn run(&self) -> Result<Vec<Diagnostic>, ProbeError> {
        self.run_with_progress(false)
    }

    /// Run the check workflow with optional progress display
    pub fn run_with_progress(&self, show_progress: bool) -> Result<Vec<Diagnostic>, ProbeError> {
        let mut progress = Progress::new(show_progress);

        let errors = check_config(self.settings);
        if !errors.is_empty() {
            debug!("override is misconfigured, skipping target checks");
            return Ok(errors);
        }

        let mut errors = Vec::new();
        for &target in Target::all() {
            progress.start_check(target);
            let result = self.check(target);
            progress.finish_check();

            let found = result?;
            debug!(check = target.key(), count = found.len(), "target checked");
            errors.extend(found);
        }

        info!(count = errors.len(), "version checks finished");
        Ok(errors)
    }

    fn check(&self, target: Target) -> Result<Vec<Diagnostic>, ProbeError> {
        match target {
            Target::Python => check_python_version(self.settings, self.runtime),
            Target::Postgresql => {
                check_postgresql_version(self.settings, self.registry, self.databases)
            }
            Target::Mysql => check_mysql_version(self.settings, self.registry, self.databases),
            Target::Sqlite => check_sqlite_version(self.settings, self.runtime),
        }
    }
}
