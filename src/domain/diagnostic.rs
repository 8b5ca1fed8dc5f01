//! Diagnostics returned by the version checks
//!
//! A diagnostic is a stable code plus a human readable message. Messages
//! name settings the way administrators write them (`settings.VERSION_CHECKS`)
//! and render offending values Python-style so they can be pasted back.

use crate::domain::{Target, Version, VersionSpecifier};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// The label used for the override in messages
const SETTING_LABEL: &str = "settings.VERSION_CHECKS";

/// Stable diagnostic identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticCode {
    /// E001: a setting has the wrong type
    BadType,
    /// E002: a specifier does not parse
    BadSpecifier,
    /// E003: Python version out of range
    PythonMismatch,
    /// E004: PostgreSQL version out of range
    PostgresqlMismatch,
    /// E005: MariaDB/MySQL version out of range
    MysqlMismatch,
    /// E006: SQLite version out of range
    SqliteMismatch,
}

impl DiagnosticCode {
    /// Returns the code as reported (`E001` ... `E006`)
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::BadType => "E001",
            DiagnosticCode::BadSpecifier => "E002",
            DiagnosticCode::PythonMismatch => "E003",
            DiagnosticCode::PostgresqlMismatch => "E004",
            DiagnosticCode::MysqlMismatch => "E005",
            DiagnosticCode::SqliteMismatch => "E006",
        }
    }

    /// Returns true for configuration problems, false for version mismatches
    pub fn is_misconfiguration(&self) -> bool {
        matches!(self, DiagnosticCode::BadType | DiagnosticCode::BadSpecifier)
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for DiagnosticCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A single check result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Stable identifier
    #[serde(rename = "id")]
    pub code: DiagnosticCode,
    /// Human readable message
    #[serde(rename = "msg")]
    pub message: String,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// E001: `value` is not of the `expected` type
    ///
    /// Without a target the message refers to the override as a whole.
    pub fn bad_type(target: Option<Target>, expected: &str, value: &Value) -> Self {
        Self::new(
            DiagnosticCode::BadType,
            format!(
                "{} is misconfigured. Expected a {} but got {}.",
                setting_label(target),
                expected,
                python_repr(value)
            ),
        )
    }

    /// E002: `text` is not a valid specifier
    pub fn bad_specifier(target: Target, text: &str) -> Self {
        Self::new(
            DiagnosticCode::BadSpecifier,
            format!(
                "{} is misconfigured. {} is not a valid PEP440 specifier.",
                setting_label(Some(target)),
                quote_str(text)
            ),
        )
    }

    /// E003/E006: the process-wide runtime version is out of range
    pub fn runtime_mismatch(target: Target, version: &Version, range: &VersionSpecifier) -> Self {
        Self::new(
            target.mismatch_code(),
            format!(
                "The current version of {} ({}) does not match the specified range ({}).",
                target.display_name(),
                version,
                range
            ),
        )
    }

    /// E004/E005: a database connection's version is out of range
    pub fn connection_mismatch(
        target: Target,
        alias: &str,
        version: &Version,
        range: &VersionSpecifier,
    ) -> Self {
        Self::new(
            target.mismatch_code(),
            format!(
                "The current version of {} ({}) for the {} database connection does not match the specified range ({}).",
                target.display_name(),
                version,
                alias,
                range
            ),
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

fn setting_label(target: Option<Target>) -> String {
    match target {
        Some(target) => format!("{}[{}]", SETTING_LABEL, quote_str(target.key())),
        None => SETTING_LABEL.to_string(),
    }
}

/// Render a settings value the way Python's `repr` would
pub fn python_repr(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote_str(s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(python_repr).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{}: {}", quote_str(key), python_repr(value)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

/// Quote a string like Python's `repr`: single quotes unless the text
/// contains a single quote and no double quote
pub fn quote_str(text: &str) -> String {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
