//! Settings: the `version_checks` override and the host description
//!
//! This module provides:
//! - [`Settings`]: the process-wide override, kept as an untyped value so
//!   that shape mistakes reach the checks and become diagnostics
//! - [`SettingsFile`]: the on-disk settings (TOML or JSON), which also
//!   declares runtime versions and database connections

use crate::domain::{RawVersion, Target, Vendor};
use crate::error::SettingsError;
use crate::probe::{ConnectionRegistry, DeclaredConnection, SystemRuntime};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

/// Default settings file name
pub const DEFAULT_SETTINGS_FILE: &str = "version-checks.toml";

/// The `version_checks` override
///
/// `None` means the setting is absent and every check is a no-op.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    version_checks: Option<Value>,
}

impl Settings {
    /// Create settings with the given override
    pub fn new(version_checks: Option<Value>) -> Self {
        Self { version_checks }
    }

    /// Settings with the override present
    pub fn overridden(version_checks: Value) -> Self {
        Self::new(Some(version_checks))
    }

    /// Returns true if the override is set, whatever its shape
    pub fn is_overridden(&self) -> bool {
        self.version_checks.is_some()
    }

    /// The raw override value
    pub fn version_checks(&self) -> Option<&Value> {
        self.version_checks.as_ref()
    }

    /// The override as a mapping, or an empty mapping when it is absent or
    /// not a mapping
    pub fn get_config(&self) -> Map<String, Value> {
        self.version_checks
            .as_ref()
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default()
    }

    /// The configured value for a single target, read through
    /// [`get_config`](Self::get_config)
    pub fn target_config(&self, target: Target) -> Option<Value> {
        self.get_config().get(target.key()).cloned()
    }
}

/// Declared runtime versions (`[runtime]` table)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuntimeSettings {
    /// Python version, instead of running the interpreter
    #[serde(default)]
    pub python: Option<RawVersion>,
    /// SQLite version, instead of running the shell
    #[serde(default)]
    pub sqlite: Option<RawVersion>,
}

/// One `[[databases]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseSettings {
    /// Connection alias
    pub alias: String,
    /// Engine identifier (`postgresql`, `mysql`, ...)
    pub vendor: Vendor,
    /// Server version in the vendor's native representation
    #[serde(default)]
    pub server_version: Option<RawVersion>,
}

/// Contents of a settings file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SettingsFile {
    /// The override; absent means nothing is checked
    #[serde(default)]
    pub version_checks: Option<Value>,
    /// Declared runtime versions
    #[serde(default)]
    pub runtime: RuntimeSettings,
    /// Database connections, in order
    #[serde(default)]
    pub databases: Vec<DatabaseSettings>,
}

impl SettingsFile {
    /// Load a settings file, choosing the format from its extension
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Err(SettingsError::not_found(path));
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| SettingsError::read_error(path, e))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&content)
                .map_err(|message| SettingsError::toml_parse_error(path, message)),
            Some("json") => Self::from_json(&content)
                .map_err(|message| SettingsError::json_parse_error(path, message)),
            _ => Err(SettingsError::unsupported_format(path)),
        }
    }

    /// Parse TOML settings
    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Parse JSON settings
    pub fn from_json(content: &str) -> Result<Self, String> {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }

    /// The override
    pub fn settings(&self) -> Settings {
        Settings::new(self.version_checks.clone())
    }

    /// The declared connections
    pub fn registry(&self) -> ConnectionRegistry {
        let mut registry = ConnectionRegistry::new();
        for db in &self.databases {
            registry.push(DeclaredConnection::new(
                db.alias.clone(),
                db.vendor.clone(),
                db.server_version.clone(),
            ));
        }
        registry
    }

    /// A runtime probe honoring the declared versions
    pub fn runtime(&self, python_bin: &str, sqlite_bin: &str) -> SystemRuntime {
        SystemRuntime::new(python_bin, sqlite_bin)
            .with_python(self.runtime.python.clone())
            .with_sqlite(self.runtime.sqlite.clone())
    }
}
