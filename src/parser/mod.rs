//! Version specifier parsing
//!
//! This module turns PEP 440 range expressions (`>=3.10,<4`, `~=13.1`,
//! `==3.11.*`) into [`VersionSpecifier`](crate::domain::VersionSpecifier)
//! values that can be tested against detected versions.

mod specifier;

pub use specifier::parse_specifier;
