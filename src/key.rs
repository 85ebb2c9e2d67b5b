//! Image Key Module
//!
//! Validates raw request identifiers into three-digit image keys.

use std::fmt;
use std::str::FromStr;

use crate::error::CacheError;

// == Image Key ==
/// A validated three-digit image key.
///
/// A key names exactly one cache entry and one origin resource. The key
/// space is the 1000 strings `000` through `999`; nothing else is ever
/// accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageKey(String);

impl ImageKey {
    // == Parse ==
    /// Parses a raw identifier into a validated key.
    ///
    /// Accepts only strings of exactly three ASCII decimal digits. Any
    /// other input (empty, wrong length, non-digit characters, leading or
    /// trailing content) is rejected. Pure function, no I/O; this gate
    /// runs before any storage or network access.
    pub fn parse(raw: &str) -> Result<ImageKey, CacheError> {
        if raw.len() == 3 && raw.bytes().all(|b| b.is_ascii_digit()) {
            Ok(ImageKey(raw.to_string()))
        } else {
            Err(CacheError::InvalidKey(raw.to_string()))
        }
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ImageKey {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ImageKey::parse(s)
    }
}
