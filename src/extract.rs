//! Version extraction from runtime and vendor specific representations
//!
//! Each target reports its version differently:
//! - Python: a `(major, minor, patch)` tuple, or `python --version` output
//! - PostgreSQL: a packed integer (`server_version_num`)
//! - MariaDB/MySQL: a `(major, minor, patch)` tuple, a packed integer
//!   (`mysql_get_server_version`) or a server string such as
//!   `10.5.8-MariaDB-log`
//! - SQLite: the library's version tuple, its packed version number or
//!   `sqlite3 --version` output

use crate::domain::{RawVersion, Target, Version};
use crate::error::ProbeError;
use regex::Regex;
use std::sync::LazyLock;

static LEADING_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)*)").unwrap());

/// Normalize the raw version reported for `target`
pub fn extract_version(target: Target, raw: &RawVersion) -> Result<Version, ProbeError> {
    match target {
        Target::Python => python_version(raw),
        Target::Postgresql => postgresql_version(raw),
        Target::Mysql => mysql_version(raw),
        Target::Sqlite => sqlite_version(raw),
    }
}

/// Python interpreter version, always rendered as `major.minor.patch`
pub fn python_version(raw: &RawVersion) -> Result<Version, ProbeError> {
    match raw {
        RawVersion::Tuple(parts) => triple(Target::Python, raw, parts),
        RawVersion::Text(text) => from_text(Target::Python, text).map(|v| padded_triple(&v)),
        RawVersion::Encoded(_) => Err(unexpected(Target::Python, raw)),
    }
}

/// PostgreSQL server version
pub fn postgresql_version(raw: &RawVersion) -> Result<Version, ProbeError> {
    match raw {
        RawVersion::Encoded(code) => Ok(decode_postgresql(*code)),
        RawVersion::Text(text) => from_text(Target::Postgresql, text),
        RawVersion::Tuple(_) => Err(unexpected(Target::Postgresql, raw)),
    }
}

/// MariaDB/MySQL server version
pub fn mysql_version(raw: &RawVersion) -> Result<Version, ProbeError> {
    match raw {
        RawVersion::Tuple(parts) => triple(Target::Mysql, raw, parts),
        RawVersion::Encoded(code) => Ok(Version::from_triple(
            code / 10000,
            (code / 100) % 100,
            code % 100,
        )),
        RawVersion::Text(text) => from_text(Target::Mysql, text),
    }
}

/// SQLite library version
pub fn sqlite_version(raw: &RawVersion) -> Result<Version, ProbeError> {
    match raw {
        RawVersion::Tuple(parts) => triple(Target::Sqlite, raw, parts),
        RawVersion::Encoded(code) => Ok(Version::from_triple(
            code / 1_000_000,
            (code / 1000) % 1000,
            code % 1000,
        )),
        RawVersion::Text(text) => from_text(Target::Sqlite, text),
    }
}

/// Decode PostgreSQL's packed `server_version_num`
///
/// Before 10 the integer packs two digits each for major, minor and patch
/// (`90105` is 9.1.5). From 10 on there is no patch level and the minor
/// takes the low four digits (`130001` is 13.1).
pub fn decode_postgresql(code: u64) -> Version {
    let major = (code / 10000) % 100;
    if major < 10 {
        Version::from_triple(major, (code / 100) % 100, code % 100)
    } else {
        Version::new(vec![major, code % 10000])
    }
}

/// Take `major.minor.patch` from a tuple, ignoring trailing fields
/// such as Python's release level
fn triple(target: Target, raw: &RawVersion, parts: &[u64]) -> Result<Version, ProbeError> {
    match parts {
        [major, minor, patch, ..] => Ok(Version::from_triple(*major, *minor, *patch)),
        _ => Err(unexpected(target, raw)),
    }
}

/// Pad or truncate a version to exactly `major.minor.patch`
fn padded_triple(version: &Version) -> Version {
    let part = |i: usize| version.release().get(i).copied().unwrap_or(0);
    Version::from_triple(part(0), part(1), part(2))
}

/// Take the first dotted numeric run of a vendor string
fn from_text(target: Target, text: &str) -> Result<Version, ProbeError> {
    LEADING_VERSION_RE
        .captures(text)
        .and_then(|caps| Version::parse(&caps[1]))
        .ok_or_else(|| ProbeError::unexpected_format(target.display_name(), text.trim()))
}

fn unexpected(target: Target, raw: &RawVersion) -> ProbeError {
    ProbeError::unexpected_format(target.display_name(), raw.to_string())
}
