//! Semantic version keys for the catalog index.
//!
//! A [`VersionKey`] is the parsed, totally ordered form of a dotted numeric
//! version string like `3.9.1`. Ordering is numeric per component, so
//! `3.9.1 < 3.10.0` even though `"9" > "1"` as text.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error returned when a version string is not `major.minor.patch` with
/// numeric components.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed version '{0}': expected dotted numeric form like 3.9.1")]
pub struct MalformedVersion(pub String);

/// A parsed `major.minor.patch` version.
///
/// Derived ordering compares components left to right, which matches
/// semantic-versioning precedence for release versions. Two keys are equal
/// iff all three components are equal; leading zeros in the input are
/// normalized away during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionKey {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl VersionKey {
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

fn parse_component(raw: &str, original: &str) -> Result<u64, MalformedVersion> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MalformedVersion(original.to_string()));
    }

    raw.parse()
        .map_err(|_| MalformedVersion(original.to_string()))
}

impl FromStr for VersionKey {
    type Err = MalformedVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');

        let (Some(major), Some(minor), Some(patch), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(MalformedVersion(s.to_string()));
        };

        Ok(Self {
            major: parse_component(major, s)?,
            minor: parse_component(minor, s)?,
            patch: parse_component(patch, s)?,
        })
    }
}

impl fmt::Display for VersionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

// Serialized as the canonical dotted string so version keys stay readable
// in the persisted index file and can key a JSON map.
impl Serialize for VersionKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct VersionKeyVisitor;

impl Visitor<'_> for VersionKeyVisitor {
    type Value = VersionKey;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a dotted numeric version string like 3.9.1")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<VersionKey, E> {
        value.parse().map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for VersionKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(VersionKeyVisitor)
    }
}
