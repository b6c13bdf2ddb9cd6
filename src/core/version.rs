// deploy-graph-core/src/core/version.rs
// ============================================================================
// Module: Dotted Version
// Description: Lexicographic dotted-numeric version comparison for task gating.
// Purpose: Decide whether a catalog task's declared version supports cross-dependencies.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Catalog tasks declare a free-form `version` string defaulting to `"1.0.0"`.
//! The only operation the pipeline needs on it is an ordering comparison
//! against a fixed threshold (see [`crate::runtime::version_gate`]), so this
//! module keeps the type minimal: parse dot-separated numeric components and
//! compare them component-wise, padding the shorter side with zeros.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Dotted Version
// ============================================================================

/// A dotted-numeric version, e.g. `2.10.0`.
///
/// # Invariants
/// - Components compare numerically, not lexicographically as strings, so
///   `2.10.0` sorts after `2.1.1`.
/// - A version with fewer than three dotted components is treated as if
///   padded with trailing zeros: `2.0` equals `2.0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version([u64; 3]);

impl Version {
    /// Builds a version directly from its `[major, minor, patch]`
    /// components, bypassing string parsing. Useful for compile-time-known
    /// thresholds.
    #[must_use]
    pub fn from_components(components: [u64; 3]) -> Self {
        Self(components)
    }

    /// Parses a dotted-numeric version string of at most three components.
    ///
    /// # Errors
    ///
    /// Returns [`VersionParseError`] when a component is not a valid `u64`
    /// or when more than three dotted components are present.
    pub fn parse(raw: &str) -> Result<Self, VersionParseError> {
        let mut parts = [0u64; 3];
        let mut count = 0;
        for component in raw.split('.') {
            if count >= parts.len() {
                return Err(VersionParseError(raw.to_owned()));
            }
            parts[count] = component
                .parse::<u64>()
                .map_err(|_| VersionParseError(raw.to_owned()))?;
            count += 1;
        }
        if count == 0 {
            return Err(VersionParseError(raw.to_owned()));
        }
        Ok(Self(parts))
    }

    /// Returns the version rendered back to its dotted-numeric form.
    #[must_use]
    pub fn to_display_string(&self) -> String {
        self.0.iter().map(ToString::to_string).collect::<Vec<_>>().join(".")
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let len = self.0.len().max(other.0.len());
        for index in 0..len {
            let left = self.0.get(index).copied().unwrap_or(0);
            let right = other.0.get(index).copied().unwrap_or(0);
            match left.cmp(&right) {
                std::cmp::Ordering::Equal => continue,
                ordering => return ordering,
            }
        }
        std::cmp::Ordering::Equal
    }
}

/// Error returned when a version string cannot be parsed as dotted-numeric.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid dotted-numeric version: {0:?}")]
pub struct VersionParseError(String);
