//! Runtime probe backed by the installed command line tools
//!
//! Versions declared in the settings file take precedence; anything not
//! declared is read from `<python> --version` and `<sqlite3> --version`.

use crate::domain::RawVersion;
use crate::error::ProbeError;
use crate::probe::RuntimeProbe;
use std::process::{Command, Output};
use tracing::debug;

/// Default Python interpreter command
pub const DEFAULT_PYTHON_BIN: &str = "python3";

/// Default SQLite shell command
pub const DEFAULT_SQLITE_BIN: &str = "sqlite3";

/// Runtime probe that asks the system's executables for their versions
#[derive(Debug, Clone)]
pub struct SystemRuntime {
    python_bin: String,
    sqlite_bin: String,
    python: Option<RawVersion>,
    sqlite: Option<RawVersion>,
}

impl Default for SystemRuntime {
    fn default() -> Self {
        Self::new(DEFAULT_PYTHON_BIN, DEFAULT_SQLITE_BIN)
    }
}

impl SystemRuntime {
    /// Create a probe using the given executables
    pub fn new(python_bin: impl Into<String>, sqlite_bin: impl Into<String>) -> Self {
        Self {
            python_bin: python_bin.into(),
            sqlite_bin: sqlite_bin.into(),
            python: None,
            sqlite: None,
        }
    }

    /// Use a declared Python version instead of running the interpreter
    pub fn with_python(mut self, version: Option<RawVersion>) -> Self {
        self.python = version;
        self
    }

    /// Use a declared SQLite version instead of running the shell
    pub fn with_sqlite(mut self, version: Option<RawVersion>) -> Self {
        self.sqlite = version;
        self
    }

    /// Run `<bin> --version` and return what it printed
    fn version_output(&self, bin: &str) -> Result<RawVersion, ProbeError> {
        let command_line = format!("{} --version", bin);
        debug!(command = %command_line, "probing runtime version");

        let output = self
            .run_command(bin, &["--version"])
            .map_err(|e| ProbeError::command_failed(&command_line, e))?;

        if !output.status.success() {
            return Err(ProbeError::command_status(
                &command_line,
                output.status.to_string(),
                String::from_utf8_lossy(&output.stderr).trim(),
            ));
        }

        // Python 2 and some builds print the version on stderr
        let stdout = String::from_utf8_lossy(&output.stdout);
        let text = if stdout.trim().is_empty() {
            String::from_utf8_lossy(&output.stderr).into_owned()
        } else {
            stdout.into_owned()
        };

        Ok(RawVersion::Text(text.trim().to_string()))
    }

    /// Run a command and capture output
    fn run_command(&self, program: &str, args: &[&str]) -> std::io::Result<Output> {
        if program.is_empty() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Empty command",
            ));
        }

        Command::new(program).args(args).output()
    }
}

impl RuntimeProbe for SystemRuntime {
    fn python_version(&self) -> Result<RawVersion, ProbeError> {
        match &self.python {
            Some(declared) => Ok(declared.clone()),
            None => self.version_output(&self.python_bin),
        }
    }

    fn sqlite_version(&self) -> Result<RawVersion, ProbeError> {
        match &self.sqlite {
            Some(declared) => Ok(declared.clone()),
            None => self.version_output(&self.sqlite_bin),
        }
    }
}
