//! Handle value object - a validated, lowercase user or channel login

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Maximum login length accepted from any source
const MAX_LEN: usize = 25;

/// A lowercase login handle identifying a voter or a channel.
///
/// Handles arrive from two trust boundaries (authenticated web sessions
/// and raw chat nicknames) and are normalized identically: lowercased,
/// then restricted to `[a-z0-9_]`, 1 to 25 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Handle(String);

impl Handle {
    /// Parse and normalize a raw login string
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let normalized = raw.trim().to_ascii_lowercase();

        if normalized.is_empty() || normalized.len() > MAX_LEN {
            return Err(DomainError::InvalidHandle(raw.to_string()));
        }
        if !normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(DomainError::InvalidHandle(raw.to_string()));
        }

        Ok(Self(normalized))
    }

    /// Get the handle as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the handle, returning the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Handle {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Handle> for String {
    fn from(handle: Handle) -> Self {
        handle.0
    }
}

impl std::str::FromStr for Handle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
