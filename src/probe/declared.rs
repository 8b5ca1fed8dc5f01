//! Connections whose version is declared in the settings file

use crate::domain::{RawVersion, Vendor};
use crate::error::ProbeError;
use crate::probe::Connection;

/// A database connection described by the settings file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredConnection {
    alias: String,
    vendor: Vendor,
    server_version: Option<RawVersion>,
}

impl DeclaredConnection {
    /// Create a declared connection
    pub fn new(alias: impl Into<String>, vendor: Vendor, server_version: Option<RawVersion>) -> Self {
        Self {
            alias: alias.into(),
            vendor,
            server_version,
        }
    }
}

impl Connection for DeclaredConnection {
    fn alias(&self) -> &str {
        &self.alias
    }

    fn vendor(&self) -> &Vendor {
        &self.vendor
    }

    fn server_version(&self) -> Result<RawVersion, ProbeError> {
        self.server_version
            .clone()
            .ok_or_else(|| ProbeError::missing_version(&self.alias))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_declared_version() {
        let conn = DeclaredConnection::new(
            "default",
            Vendor::Mysql,
            Some(RawVersion::Tuple(vec![10, 5, 8])),
        );
        assert_eq!(conn.alias(), "default");
        assert_eq!(conn.vendor(), &Vendor::Mysql);
        assert_eq!(
            conn.server_version().unwrap(),
            RawVersion::Tuple(vec![10, 5, 8])
        );
    }

    #[test]
    fn test_missing_version_is_error() {
        let conn = DeclaredConnection::new("replica", Vendor::Postgresql, None);
        let err = conn.server_version().unwrap_err();
        assert!(matches!(err, ProbeError::MissingVersion { ref alias } if alias == "replica"));
    }
}
