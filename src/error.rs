//! Application error types using thiserror
//!
//! Error hierarchy:
//! - SettingsError: Issues with loading the settings file
//! - ProbeError: A runtime or database connection could not report its version
//! - InvalidSpecifierError: A version range expression failed to parse
//!
//! Configuration mistakes inside the `version_checks` table are not errors:
//! they are reported as diagnostics by the checks themselves.

use std::path::PathBuf;
use thiserror::Error;

/// Errors related to loading the settings file
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Settings file not found
    #[error("settings file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read settings file
    #[error("failed to read settings file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("failed to parse TOML in {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },

    /// JSON parsing error
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },

    /// Unsupported settings format
    #[error("unsupported settings format: {path} (expected .toml or .json)")]
    UnsupportedFormat { path: PathBuf },
}

/// Errors raised by the collaborators that report versions
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The probe command could not be started
    #[error("failed to run '{command}': {source}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The probe command ran but exited unsuccessfully
    #[error("'{command}' exited with {status}: {stderr}")]
    CommandStatus {
        command: String,
        status: String,
        stderr: String,
    },

    /// The reported version could not be understood
    #[error("unexpected {subject} version format: {value}")]
    UnexpectedFormat { subject: String, value: String },

    /// A declared connection has no server version to report
    #[error("database connection '{alias}' does not report a server version")]
    MissingVersion { alias: String },
}

/// A version range expression that does not follow PEP 440
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid specifier '{text}': {reason}")]
pub struct InvalidSpecifierError {
    /// The rejected text, as given
    pub text: String,
    /// What was wrong with it
    pub reason: String,
}

impl SettingsError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        SettingsError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SettingsError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new TomlParseError
    pub fn toml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        SettingsError::TomlParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        SettingsError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new UnsupportedFormat error
    pub fn unsupported_format(path: impl Into<PathBuf>) -> Self {
        SettingsError::UnsupportedFormat { path: path.into() }
    }
}

impl ProbeError {
    /// Creates a new CommandFailed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        ProbeError::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Creates a new CommandStatus error
    pub fn command_status(
        command: impl Into<String>,
        status: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        ProbeError::CommandStatus {
            command: command.into(),
            status: status.into(),
            stderr: stderr.into(),
        }
    }

    /// Creates a new MissingVersion error
    pub fn missing_version(alias: impl Into<String>) -> Self {
        ProbeError::MissingVersion {
            alias: alias.into(),
        }
    }

    /// Creates a new UnexpectedFormat error
    pub fn unexpected_format(subject: impl Into<String>, value: impl Into<String>) -> Self {
        ProbeError::UnexpectedFormat {
            subject: subject.into(),
            value: value.into(),
        }
    }
}

impl InvalidSpecifierError {
    /// Creates a new InvalidSpecifierError
    pub fn new(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reason: reason.into(),
        }
    }
}
