//! Checks for process-wide runtimes: the Python interpreter and SQLite

use crate::checks::single_specifier;
use crate::domain::{Diagnostic, RawVersion, Target};
use crate::error::ProbeError;
use crate::extract::extract_version;
use crate::probe::RuntimeProbe;
use crate::settings::Settings;
use tracing::debug;

/// Check the Python interpreter against `version_checks.python` (E003)
pub fn check_python_version(
    settings: &Settings,
    runtime: &dyn RuntimeProbe,
) -> Result<Vec<Diagnostic>, ProbeError> {
    check_runtime(settings, Target::Python, || runtime.python_version())
}

/// Check the SQLite library against `version_checks.sqlite` (E006)
pub fn check_sqlite_version(
    settings: &Settings,
    runtime: &dyn RuntimeProbe,
) -> Result<Vec<Diagnostic>, ProbeError> {
    check_runtime(settings, Target::Sqlite, || runtime.sqlite_version())
}

fn check_runtime(
    settings: &Settings,
    target: Target,
    probe: impl FnOnce() -> Result<RawVersion, ProbeError>,
) -> Result<Vec<Diagnostic>, ProbeError> {
    let Some(value) = settings.target_config(target) else {
        return Ok(Vec::new());
    };

    let range = match single_specifier(target, &value) {
        Ok(range) => range,
        Err(diagnostic) => return Ok(vec![diagnostic]),
    };

    // Only probe once the configuration is known to be usable
    let version = extract_version(target, &probe()?)?;
    debug!(check = target.key(), %version, %range, "checking runtime version");

    if range.contains(&version) {
        Ok(Vec::new())
    } else {
        Ok(vec![Diagnostic::runtime_mismatch(target, &version, &range)])
    }
}
