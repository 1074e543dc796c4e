//! Memory sizes in the simulator's string form.
//!
//! The simulator's tile factories take sizes as strings such as `"32MB"` or `"3072MB"`.
//! This module provides a byte-count type that parses and prints that form:
//! 1. **Parsing:** A decimal number followed by `B`, `KB`, `MB` or `GB` (binary multiples).
//! 2. **Formatting:** The largest unit that divides the byte count evenly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::ConfigError;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;
const GIB: u64 = 1024 * MIB;

/// Unit suffixes, largest first so formatting picks the coarsest exact unit.
const UNITS: [(&str, u64); 4] = [("GB", GIB), ("MB", MIB), ("KB", KIB), ("B", 1)];

/// A memory size in bytes.
///
/// Serialized as its string form so manifests read the same as the simulator's
/// own configuration.
///
/// # Examples
///
/// ```
/// use tilegraph_core::common::MemSize;
///
/// let spm: MemSize = "32MB".parse().unwrap();
/// assert_eq!(spm.bytes(), 32 * 1024 * 1024);
/// assert_eq!(spm.to_string(), "32MB");
/// assert_eq!(MemSize::from_mib(3072).to_string(), "3GB");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemSize(u64);

impl MemSize {
    /// Creates a size from a byte count.
    #[inline]
    pub const fn from_bytes(bytes: u64) -> Self {
        Self(bytes)
    }

    /// Creates a size from a number of mebibytes.
    #[inline]
    pub const fn from_mib(mib: u64) -> Self {
        Self(mib * MIB)
    }

    /// Returns the size in bytes.
    #[inline]
    pub const fn bytes(self) -> u64 {
        self.0
    }

    /// Returns the size in mebibytes, rounded down.
    #[inline]
    pub const fn mib(self) -> u64 {
        self.0 / MIB
    }

    /// Formats the size in whole mebibytes (`"3072MB"`), the form the tile factories
    /// are configured with. Sizes below one mebibyte fall back to [`fmt::Display`].
    pub fn to_mb_string(self) -> String {
        if self.0 >= MIB && self.0 % MIB == 0 {
            format!("{}MB", self.0 / MIB)
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for MemSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "0B");
        }
        for (suffix, scale) in UNITS {
            if self.0 % scale == 0 {
                return write!(f, "{}{}", self.0 / scale, suffix);
            }
        }
        write!(f, "{}B", self.0)
    }
}

impl FromStr for MemSize {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidSize {
            value: s.to_string(),
        };
        let trimmed = s.trim();
        let digits_end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        let (number, suffix) = trimmed.split_at(digits_end);
        if number.is_empty() {
            return Err(invalid());
        }
        let value: u64 = number.parse().map_err(|_| invalid())?;
        let suffix = suffix.trim();
        let scale = if suffix.is_empty() {
            1
        } else {
            UNITS
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(suffix))
                .map(|&(_, scale)| scale)
                .ok_or_else(invalid)?
        };
        value.checked_mul(scale).map(Self).ok_or_else(invalid)
    }
}

impl Serialize for MemSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_mb_string())
    }
}

impl<'de> Deserialize<'de> for MemSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
