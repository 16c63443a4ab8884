//! Patch-insensitive ordering of `major.minor` version identifiers

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A runtime release line such as `3.11`.
///
/// Ordering is numeric on `(major, minor)`, so `3.9 < 3.10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MajorMinor {
    pub major: u64,
    pub minor: u64,
}

impl MajorMinor {
    pub const fn new(major: u64, minor: u64) -> Self {
        Self { major, minor }
    }

    /// First release line of the next major version (`3.10` -> `4.0`).
    ///
    /// `None` when the major component is already `u64::MAX`.
    pub fn next_major(self) -> Option<Self> {
        self.major.checked_add(1).map(|major| Self::new(major, 0))
    }

    /// Next release line within the same major version (`3.10` -> `3.11`).
    pub fn next_minor(self) -> Option<Self> {
        self.minor.checked_add(1).map(|minor| Self::new(self.major, minor))
    }

    pub fn same_major(self, other: Self) -> bool {
        self.major == other.major
    }

    pub fn same_major_minor(self, other: Self) -> bool {
        self.major == other.major && self.minor == other.minor
    }
}

impl fmt::Display for MajorMinor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Returned when a string is not `X.Y` or `X.Y.Z` with numeric components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnparsableVersion(pub String);

impl fmt::Display for UnparsableVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unparsable version: {:?}", self.0)
    }
}

impl std::error::Error for UnparsableVersion {}

impl FromStr for MajorMinor {
    type Err = UnparsableVersion;

    /// Parses `X.Y` or `X.Y.Z`, discarding the patch component.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || UnparsableVersion(s.to_string());
        let mut parts = s.split('.');

        let major = parts.next().and_then(parse_component).ok_or_else(err)?;
        let minor = parts.next().and_then(parse_component).ok_or_else(err)?;

        match (parts.next(), parts.next()) {
            (None, None) => {}
            (Some(patch), None) if parse_component(patch).is_some() => {}
            _ => return Err(err()),
        }

        Ok(Self::new(major, minor))
    }
}

impl Serialize for MajorMinor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MajorMinor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

fn parse_component(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Compare two version strings on `(major, minor)`.
///
/// Returns `None` when either side is unparsable; callers are expected to
/// pass values that already went through the grammar.
pub fn compare_versions(a: &str, b: &str) -> Option<Ordering> {
    let a: MajorMinor = a.parse().ok()?;
    let b: MajorMinor = b.parse().ok()?;
    Some(a.cmp(&b))
}

pub fn same_major(a: &str, b: &str) -> bool {
    matches!(
        (a.parse::<MajorMinor>(), b.parse::<MajorMinor>()),
        (Ok(a), Ok(b)) if a.same_major(b)
    )
}

pub fn same_major_minor(a: &str, b: &str) -> bool {
    matches!(
        (a.parse::<MajorMinor>(), b.parse::<MajorMinor>()),
        (Ok(a), Ok(b)) if a.same_major_minor(b)
    )
}
