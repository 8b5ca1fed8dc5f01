//! PEP 440 specifier parser
//!
//! Handles clause formats:
//! - Exact: `==1.2.3`, prefix `==1.2.*`
//! - Exclusion: `!=1.2.3`, `!=1.*`
//! - Comparison: `>=1.2`, `>1.2`, `<=1.2`, `<1.2`
//! - Compatible release: `~=1.2` (at least two segments)
//! - Arbitrary equality: `===1.2.3`
//! - Intersection: `>=1.0, <2.0`

use crate::domain::{Clause, ClauseTarget, Operator, Version, VersionSpecifier};
use crate::error::InvalidSpecifierError;
use regex::Regex;
use std::sync::LazyLock;

// Longest operators first so `===` wins over `==` and `<=` over `<`
static CLAUSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(===|~=|==|!=|<=|>=|<|>)\s*(\S+)$").unwrap());
static RELEASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[vV]?(\d+(?:\.\d+)*)$").unwrap());
static PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[vV]?(\d+(?:\.\d+)*)\.\*$").unwrap());
static ARBITRARY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\s;)]+$").unwrap());

/// Parse a comma-separated specifier into an intersection of clauses
///
/// Empty clauses are ignored, so `""` yields a specifier that matches
/// everything and `">=1.0,"` is the same as `">=1.0"`.
pub fn parse_specifier(text: &str) -> Result<VersionSpecifier, InvalidSpecifierError> {
    let clauses = text
        .split(',')
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .map(|clause| parse_clause(clause).map_err(|reason| InvalidSpecifierError::new(text, reason)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(VersionSpecifier::from_clauses(clauses))
}

/// Parse a single trimmed clause such as `>=3.10`
fn parse_clause(clause: &str) -> Result<Clause, String> {
    let caps = CLAUSE_RE
        .captures(clause)
        .ok_or_else(|| format!("'{}' is not of the form <operator><version>", clause))?;

    let symbol = &caps[1];
    let version_text = &caps[2];
    let operator =
        Operator::from_symbol(symbol).ok_or_else(|| format!("unknown operator '{}'", symbol))?;

    let target = match operator {
        Operator::Arbitrary => {
            if !ARBITRARY_RE.is_match(version_text) {
                return Err(format!("invalid arbitrary version '{}'", version_text));
            }
            ClauseTarget::Literal(version_text.to_string())
        }
        Operator::Equal | Operator::NotEqual => {
            if let Some(prefix) = PREFIX_RE.captures(version_text) {
                ClauseTarget::Prefix(release(&prefix[1])?)
            } else {
                ClauseTarget::Release(plain_release(version_text)?)
            }
        }
        Operator::Compatible => {
            let version = plain_release(version_text)?;
            if version.release().len() < 2 {
                return Err(format!(
                    "'~=' needs at least two release segments, got '{}'",
                    version_text
                ));
            }
            ClauseTarget::Release(version)
        }
        Operator::LessOrEqual | Operator::GreaterOrEqual | Operator::Less | Operator::Greater => {
            ClauseTarget::Release(plain_release(version_text)?)
        }
    };

    Ok(Clause::new(operator, target, version_text))
}

/// A version without wildcard, e.g. `1.2.3`
fn plain_release(text: &str) -> Result<Version, String> {
    let caps = RELEASE_RE
        .captures(text)
        .ok_or_else(|| format!("invalid version '{}'", text))?;
    release(&caps[1])
}

fn release(digits: &str) -> Result<Version, String> {
    Version::parse(digits).ok_or_else(|| format!("version '{}' is out of range", digits))
}
