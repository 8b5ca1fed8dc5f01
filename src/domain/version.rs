//! Release versions and the raw forms runtimes report them in
//!
//! A [`Version`] is a sequence of numeric release segments (`3.11.4`,
//! `13.0`). Comparison follows PEP 440 release semantics: missing trailing
//! segments count as zero, so `13.0 == 13.0.0`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A numeric release version
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Version {
    /// Release segments, never empty
    release: Vec<u64>,
}

impl Version {
    /// Create a version from its release segments (an empty list means `0`)
    pub fn new(release: impl Into<Vec<u64>>) -> Self {
        let mut release = release.into();
        if release.is_empty() {
            release.push(0);
        }
        Self { release }
    }

    /// Create a three-part `major.minor.patch` version
    pub fn from_triple(major: u64, minor: u64, patch: u64) -> Self {
        Self::new(vec![major, minor, patch])
    }

    /// Parse a dotted numeric version such as `3.11.4` or `v13.1`
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let text = text.strip_prefix('v').unwrap_or(text);
        if text.is_empty() {
            return None;
        }

        let release = text
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    None
                } else {
                    part.parse::<u64>().ok()
                }
            })
            .collect::<Option<Vec<u64>>>()?;

        Some(Self::new(release))
    }

    /// The release segments exactly as held
    pub fn release(&self) -> &[u64] {
        &self.release
    }

    /// Segment at `index`, zero when the version is shorter
    fn segment(&self, index: usize) -> u64 {
        self.release.get(index).copied().unwrap_or(0)
    }

    /// Whether this version falls under the release `prefix` (`==1.2.*`)
    ///
    /// The version is zero-padded to the prefix length before comparing.
    pub fn starts_with(&self, prefix: &[u64]) -> bool {
        prefix
            .iter()
            .enumerate()
            .all(|(index, &expected)| self.segment(index) == expected)
    }

    /// Release segments with trailing zeros removed
    fn significant(&self) -> &[u64] {
        let len = self
            .release
            .iter()
            .rposition(|&segment| segment != 0)
            .map_or(0, |pos| pos + 1);
        &self.release[..len]
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.significant() == other.significant()
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significant().hash(state);
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.release.len().max(other.release.len());
        (0..len)
            .map(|index| self.segment(index).cmp(&other.segment(index)))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.release.iter().map(u64::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

impl TryFrom<String> for Version {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Version::parse(&value).ok_or_else(|| format!("invalid version: {}", value))
    }
}

/// A version as reported by a runtime or database connection, before decoding
///
/// Each engine has its own convention: PostgreSQL reports a packed integer,
/// MySQL drivers report a tuple, command line tools print a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawVersion {
    /// Packed integer (e.g. PostgreSQL `server_version_num`)
    Encoded(u64),
    /// Tuple of release segments (e.g. `(10, 5, 8)`)
    Tuple(Vec<u64>),
    /// Free-form vendor string (e.g. `"10.5.8-MariaDB-log"`)
    Text(String),
}

impl fmt::Display for RawVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawVersion::Encoded(code) => write!(f, "{}", code),
            RawVersion::Tuple(parts) => {
                let parts: Vec<String> = parts.iter().map(u64::to_string).collect();
                write!(f, "({})", parts.join(", "))
            }
            RawVersion::Text(text) => write!(f, "{:?}", text),
        }
    }
}
