//! Core domain models for version-checks
//!
//! This module contains the fundamental types used throughout the crate:
//! - Versions and the raw forms runtimes report them in
//! - PEP 440 version specifiers
//! - Check targets and database vendors
//! - Diagnostics returned to the caller

mod diagnostic;
mod specifier;
mod target;
mod vendor;
mod version;

pub use diagnostic::{python_repr, quote_str, Diagnostic, DiagnosticCode};
pub use specifier::{Clause, ClauseTarget, Operator, VersionSpecifier};
pub use target::Target;
pub use vendor::Vendor;
pub use version::{RawVersion, Version};
