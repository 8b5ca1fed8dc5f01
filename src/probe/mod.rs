//! Collaborators that report runtime and database versions
//!
//! This module provides:
//! - [`RuntimeProbe`]: the Python interpreter and SQLite library versions
//! - [`Connection`]: one database connection's vendor and server version
//! - [`ConnectionRegistry`]: the ordered set of known connections
//!
//! The checks only read through these traits; errors they return are
//! passed through to the caller untouched.

mod declared;
mod system;

pub use declared::DeclaredConnection;
pub use system::{SystemRuntime, DEFAULT_PYTHON_BIN, DEFAULT_SQLITE_BIN};

use crate::domain::{RawVersion, Vendor};
use crate::error::ProbeError;

/// Reports the versions of the process-wide runtimes
pub trait RuntimeProbe {
    /// The Python interpreter version
    fn python_version(&self) -> Result<RawVersion, ProbeError>;

    /// The SQLite library version
    fn sqlite_version(&self) -> Result<RawVersion, ProbeError>;
}

/// A database connection, borrowed read-only
pub trait Connection {
    /// The alias this connection is configured under
    fn alias(&self) -> &str;

    /// The engine this connection talks to
    fn vendor(&self) -> &Vendor;

    /// The server version in the vendor's native representation
    fn server_version(&self) -> Result<RawVersion, ProbeError>;
}

/// Known database connections, in configuration order
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: Vec<Box<dyn Connection>>,
}

impl ConnectionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection
    pub fn push(&mut self, connection: impl Connection + 'static) {
        self.connections.push(Box::new(connection));
    }

    /// Builder form of [`push`](Self::push)
    pub fn with(mut self, connection: impl Connection + 'static) -> Self {
        self.push(connection);
        self
    }

    /// Iterate over all connections
    pub fn iter(&self) -> impl Iterator<Item = &(dyn Connection + 'static)> + '_ {
        self.connections.iter().map(|c| &**c)
    }

    /// Aliases of all connections, in order
    pub fn aliases(&self) -> Vec<String> {
        self.iter().map(|c| c.alias().to_string()).collect()
    }

    /// Look up a connection by alias
    pub fn get(&self, alias: &str) -> Option<&(dyn Connection + 'static)> {
        self.iter().find(|c| c.alias() == alias)
    }

    /// Number of connections
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Returns true if no connection is known
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

impl std::fmt::Debug for ConnectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|c| (c.alias(), c.vendor())))
            .finish()
    }
}
