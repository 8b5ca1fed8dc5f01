//! Version checks
//!
//! This module provides:
//! - [`check_config`]: validates the shape of the override as a whole
//! - Runtime checks ([`check_python_version`], [`check_sqlite_version`])
//! - Database checks ([`check_postgresql_version`], [`check_mysql_version`])
//!
//! Every check runs the same steps: look up its key, validate the value's
//! type (E001), parse the specifier (E002), then compare the detected
//! version against it. Checks can be run on their own; a malformed override
//! simply makes them see no configuration.

mod database;
mod runtime;

pub use database::{check_mysql_version, check_postgresql_version, TargetSpecifiers};
pub use runtime::{check_python_version, check_sqlite_version};

use crate::domain::{Diagnostic, Target, VersionSpecifier};
use crate::settings::Settings;
use serde_json::Value;
use tracing::debug;

/// Expected type of the override itself
pub const EXPECTED_MAPPING: &str = "dict";

/// Expected type of a runtime target's value
pub const EXPECTED_STR: &str = "str";

/// Expected type of a database target's value
pub const EXPECTED_STR_OR_MAPPING: &str = "str or dict[str, str]";

/// Validate that the override, when present, is a mapping
pub fn check_config(settings: &Settings) -> Vec<Diagnostic> {
    match settings.version_checks() {
        None => Vec::new(),
        Some(value) if value.is_object() => Vec::new(),
        Some(value) => vec![Diagnostic::bad_type(None, EXPECTED_MAPPING, value)],
    }
}

/// Parse one specifier string configured for `target`
fn parse_for(target: Target, text: &str) -> Result<VersionSpecifier, Diagnostic> {
    VersionSpecifier::parse(text).map_err(|err| {
        debug!(check = target.key(), reason = %err.reason, "invalid specifier");
        Diagnostic::bad_specifier(target, text)
    })
}

/// Validate and parse a value that must be a single specifier string
fn single_specifier(target: Target, value: &Value) -> Result<VersionSpecifier, Diagnostic> {
    match value.as_str() {
        Some(text) => parse_for(target, text),
        None => Err(Diagnostic::bad_type(Some(target), EXPECTED_STR, value)),
    }
}
