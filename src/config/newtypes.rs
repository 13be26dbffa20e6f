//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// A validated AWS region name.
///
/// The region is one of the inputs of the SigV4 credential scope, so a
/// malformed value would only surface later as an opaque signature
/// mismatch. Validation catches it before any network activity.
///
/// # Accepted Format
///
/// Lowercase ASCII letters, digits and hyphens, not starting or ending
/// with a hyphen. Surrounding whitespace is trimmed.
///
/// # Example
///
/// ```rust
/// use iam_signed::Region;
///
/// let region = Region::new("eu-west-1").unwrap();
/// assert_eq!(region.as_ref(), "eu-west-1");
///
/// assert!(Region::new("").is_err());
/// assert!(Region::new("EU WEST").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Region(String);

impl Region {
    /// Creates a new validated region.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRegion`] if the region is empty or malformed.
    pub fn new(region: impl Into<String>) -> Result<Self, ConfigError> {
        let region = region.into();
        let trimmed = region.trim();

        if !Self::is_valid_region(trimmed) {
            return Err(ConfigError::InvalidRegion { region });
        }

        Ok(Self(trimmed.to_string()))
    }

    fn is_valid_region(name: &str) -> bool {
        if name.is_empty() || name.starts_with('-') || name.ends_with('-') {
            return false;
        }

        name.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }
}

impl AsRef<str> for Region {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Region {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
