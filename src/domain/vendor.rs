//! Database vendor identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// The engine a database connection talks to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Vendor {
    /// PostgreSQL
    Postgresql,
    /// MariaDB or MySQL
    Mysql,
    /// SQLite
    Sqlite,
    /// Any other backend, by identifier
    Other(String),
}

impl Vendor {
    /// Returns the vendor identifier (`postgresql`, `mysql`, ...)
    pub fn as_str(&self) -> &str {
        match self {
            Vendor::Postgresql => "postgresql",
            Vendor::Mysql => "mysql",
            Vendor::Sqlite => "sqlite",
            Vendor::Other(name) => name,
        }
    }
}

impl From<String> for Vendor {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "postgresql" | "postgres" => Vendor::Postgresql,
            "mysql" | "mariadb" => Vendor::Mysql,
            "sqlite" | "sqlite3" => Vendor::Sqlite,
            _ => Vendor::Other(value),
        }
    }
}

impl From<&str> for Vendor {
    fn from(value: &str) -> Self {
        Vendor::from(value.to_string())
    }
}

impl From<Vendor> for String {
    fn from(vendor: Vendor) -> Self {
        vendor.as_str().to_string()
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
