use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use semver::Version;
use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version `{input}`")]
pub struct VersionParseError {
    input: String,
}

/// A release version with semantic-version ordering.
///
/// Parsing is lenient about the shapes release tags take in practice: a
/// leading `v`, one or two components (`2`, `2.10`), and zero-padded
/// components (`3.24.031419`). The text as written is kept for display.
///
/// Equality and ordering follow semver precedence, so build metadata
/// (`3.0.0+7`) never makes one version newer than another.
#[derive(Debug, Clone)]
pub struct ReleaseVersion {
    raw: String,
    parsed: Version,
}

impl ReleaseVersion {
    /// Parse a release version.
    ///
    /// # Errors
    /// Returns an error when the input is not a version in any accepted
    /// shape.
    pub fn parse(input: &str) -> Result<Self, VersionParseError> {
        let raw = input.trim();
        let unprefixed = raw.strip_prefix(['v', 'V']).unwrap_or(raw);

        parse_semver(unprefixed)
            .map(|parsed| Self {
                raw: raw.to_string(),
                parsed,
            })
            .ok_or_else(|| VersionParseError {
                input: input.to_string(),
            })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn semver(&self) -> &Version {
        &self.parsed
    }
}

impl PartialEq for ReleaseVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ReleaseVersion {}

impl PartialOrd for ReleaseVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ReleaseVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parsed.cmp_precedence(&other.parsed)
    }
}

impl Hash for ReleaseVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.parsed.major.hash(state);
        self.parsed.minor.hash(state);
        self.parsed.patch.hash(state);
        self.parsed.pre.hash(state);
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for ReleaseVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ReleaseVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

fn parse_semver(version: &str) -> Option<Version> {
    if let Ok(parsed) = Version::parse(version) {
        return Some(parsed);
    }

    let (core, suffix) = split_semver_core_and_suffix(version);
    let components = core
        .split('.')
        .map(|part| part.parse::<u64>().ok())
        .collect::<Option<Vec<_>>>()?;

    let (major, minor, patch) = match components.as_slice() {
        [major] => (*major, 0, 0),
        [major, minor] => (*major, *minor, 0),
        [major, minor, patch] => (*major, *minor, *patch),
        _ => return None,
    };

    Version::parse(&format!("{major}.{minor}.{patch}{suffix}")).ok()
}

fn split_semver_core_and_suffix(version: &str) -> (&str, &str) {
    let suffix_idx = version.find(['-', '+']).unwrap_or(version.len());
    (&version[..suffix_idx], &version[suffix_idx..])
}
