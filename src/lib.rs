//! version-checks - runtime and database version checker library
//!
//! This library checks detected versions against PEP 440 ranges for:
//! - Python (the running interpreter)
//! - PostgreSQL (per database connection)
//! - MariaDB/MySQL (per database connection)
//! - SQLite (the linked library)

pub mod checks;
pub mod cli;
pub mod domain;
pub mod error;
pub mod extract;
pub mod orchestrator;
pub mod output;
pub mod parser;
pub mod probe;
pub mod progress;
pub mod settings;
