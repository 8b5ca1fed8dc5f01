//! PEP 440 version specifiers
//!
//! A [`VersionSpecifier`] is a set of comparison clauses such as
//! `>=1.0,<2.0`. A version is contained in the specifier when it satisfies
//! every clause. Use [`VersionSpecifier::parse`] to build one from text.

use crate::domain::Version;
use crate::error::InvalidSpecifierError;
use std::fmt;
use std::str::FromStr;

/// Comparison operator of a single clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `==` (supports a trailing `.*`)
    Equal,
    /// `!=` (supports a trailing `.*`)
    NotEqual,
    /// `<=`
    LessOrEqual,
    /// `>=`
    GreaterOrEqual,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `~=` compatible release
    Compatible,
    /// `===` arbitrary string equality
    Arbitrary,
}

impl Operator {
    /// Returns the operator as written in a specifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::LessOrEqual => "<=",
            Operator::GreaterOrEqual => ">=",
            Operator::Less => "<",
            Operator::Greater => ">",
            Operator::Compatible => "~=",
            Operator::Arbitrary => "===",
        }
    }

    /// Look up an operator from its textual form
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "==" => Some(Operator::Equal),
            "!=" => Some(Operator::NotEqual),
            "<=" => Some(Operator::LessOrEqual),
            ">=" => Some(Operator::GreaterOrEqual),
            "<" => Some(Operator::Less),
            ">" => Some(Operator::Greater),
            "~=" => Some(Operator::Compatible),
            "===" => Some(Operator::Arbitrary),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a clause compares against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClauseTarget {
    /// A concrete release (`>=1.2`)
    Release(Version),
    /// A release prefix (`==1.2.*`)
    Prefix(Version),
    /// Arbitrary text, only for `===`
    Literal(String),
}

/// One `<op><version>` clause of a specifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    operator: Operator,
    target: ClauseTarget,
    /// Version text as written, without surrounding whitespace
    text: String,
}

impl Clause {
    /// Create a clause; the parser guarantees the operator/target pairing is valid
    pub(crate) fn new(operator: Operator, target: ClauseTarget, text: impl Into<String>) -> Self {
        Self {
            operator,
            target,
            text: text.into(),
        }
    }

    /// The clause operator
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// The version text as written
    pub fn version_text(&self) -> &str {
        &self.text
    }

    /// Whether `version` satisfies this clause
    pub fn matches(&self, version: &Version) -> bool {
        match (&self.operator, &self.target) {
            (Operator::Equal, ClauseTarget::Release(v)) => version == v,
            (Operator::Equal, ClauseTarget::Prefix(p)) => version.starts_with(p.release()),
            (Operator::NotEqual, ClauseTarget::Release(v)) => version != v,
            (Operator::NotEqual, ClauseTarget::Prefix(p)) => !version.starts_with(p.release()),
            (Operator::LessOrEqual, ClauseTarget::Release(v)) => version <= v,
            (Operator::GreaterOrEqual, ClauseTarget::Release(v)) => version >= v,
            (Operator::Less, ClauseTarget::Release(v)) => version < v,
            (Operator::Greater, ClauseTarget::Release(v)) => version > v,
            (Operator::Compatible, ClauseTarget::Release(v)) => {
                let release = v.release();
                let prefix = &release[..release.len().saturating_sub(1)];
                version >= v && version.starts_with(prefix)
            }
            (Operator::Arbitrary, ClauseTarget::Literal(text)) => {
                version.to_string().eq_ignore_ascii_case(text)
            }
            // Never produced by the parser
            _ => false,
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.text)
    }
}

/// An intersection of version clauses
///
/// The empty specifier contains every version.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VersionSpecifier {
    clauses: Vec<Clause>,
}

impl VersionSpecifier {
    /// Build a specifier from already validated clauses
    pub(crate) fn from_clauses(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }

    /// Parse a comma-separated PEP 440 specifier such as `>=3.10,<4`
    pub fn parse(text: &str) -> Result<Self, InvalidSpecifierError> {
        crate::parser::parse_specifier(text)
    }

    /// The clauses, in the order they were written
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Returns true if the specifier has no clauses
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Whether `version` satisfies every clause
    pub fn contains(&self, version: &Version) -> bool {
        self.clauses.iter().all(|clause| clause.matches(version))
    }
}

impl FromStr for VersionSpecifier {
    type Err = InvalidSpecifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Renders the clauses sorted by their text and joined with `,`
impl fmt::Display for VersionSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rendered: Vec<String> = self.clauses.iter().map(Clause::to_string).collect();
        rendered.sort();
        write!(f, "{}", rendered.join(","))
    }
}
