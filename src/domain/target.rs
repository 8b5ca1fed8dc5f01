//! Check targets: the runtimes and database engines a range can be set for

use crate::domain::{DiagnosticCode, Vendor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A recognized key of the `version_checks` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// The Python interpreter
    Python,
    /// PostgreSQL connections
    Postgresql,
    /// MariaDB / MySQL connections
    Mysql,
    /// The SQLite library
    Sqlite,
}

impl Target {
    /// Returns the configuration key for this target
    pub fn key(&self) -> &'static str {
        match self {
            Target::Python => "python",
            Target::Postgresql => "postgresql",
            Target::Mysql => "mysql",
            Target::Sqlite => "sqlite",
        }
    }

    /// Returns the display name used in diagnostics
    pub fn display_name(&self) -> &'static str {
        match self {
            Target::Python => "Python",
            Target::Postgresql => "PostgreSQL",
            Target::Mysql => "MariaDB/MySQL",
            Target::Sqlite => "SQLite",
        }
    }

    /// Returns the diagnostic code reported when the version is out of range
    pub fn mismatch_code(&self) -> DiagnosticCode {
        match self {
            Target::Python => DiagnosticCode::PythonMismatch,
            Target::Postgresql => DiagnosticCode::PostgresqlMismatch,
            Target::Mysql => DiagnosticCode::MysqlMismatch,
            Target::Sqlite => DiagnosticCode::SqliteMismatch,
        }
    }

    /// Returns the connection vendor checked by database targets; `None`
    /// for process-wide runtimes
    pub fn vendor(&self) -> Option<Vendor> {
        match self {
            Target::Postgresql => Some(Vendor::Postgresql),
            Target::Mysql => Some(Vendor::Mysql),
            Target::Python | Target::Sqlite => None,
        }
    }

    /// Returns all targets in check order
    pub fn all() -> &'static [Target] {
        &[
            Target::Python,
            Target::Postgresql,
            Target::Mysql,
            Target::Sqlite,
        ]
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys() {
        assert_eq!(Target::Python.key(), "python");
        assert_eq!(Target::Postgresql.key(), "postgresql");
        assert_eq!(Target::Mysql.key(), "mysql");
        assert_eq!(Target::Sqlite.key(), "sqlite");
    }

    #[test]
    fn test_display_names() {
        assert_eq!(format!("{}", Target::Python), "Python");
        assert_eq!(format!("{}", Target::Postgresql), "PostgreSQL");
        assert_eq!(format!("{}", Target::Mysql), "MariaDB/MySQL");
        assert_eq!(format!("{}", Target::Sqlite), "SQLite");
    }

    #[test]
    fn test_mismatch_codes() {
        assert_eq!(Target::Python.mismatch_code().as_str(), "E003");
        assert_eq!(Target::Postgresql.mismatch_code().as_str(), "E004");
        assert_eq!(Target::Mysql.mismatch_code().as_str(), "E005");
        assert_eq!(Target::Sqlite.mismatch_code().as_str(), "E006");
    }

    #[test]
    fn test_vendors() {
        assert_eq!(Target::Postgresql.vendor(), Some(Vendor::Postgresql));
        assert_eq!(Target::Mysql.vendor(), Some(Vendor::Mysql));
        assert_eq!(Target::Sqlite.vendor(), None);
    }

    #[test]
    fn test_check_order() {
        assert_eq!(
            Target::all(),
            &[
                Target::Python,
                Target::Postgresql,
                Target::Mysql,
                Target::Sqlite
            ]
        );
    }
}
