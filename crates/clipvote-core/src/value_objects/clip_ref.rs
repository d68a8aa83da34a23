//! Clip reference - how callers name a clip before resolution

use std::fmt;

use serde::{Deserialize, Serialize};

/// A caller-supplied clip reference.
///
/// Chat commands and dashboard URLs use the channel-scoped sequential
/// display number; API clients may pass the stable external clip id
/// directly. Purely numeric strings parse as a sequence number, anything
/// else as an external id. Both resolve to a `Clip` before any vote
/// operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClipRef {
    /// Channel-scoped sequential display number
    Seq(i64),
    /// Stable external clip identifier
    Id(String),
}

impl ClipRef {
    /// Parse a raw reference string
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<i64>() {
            Ok(seq) if seq > 0 => Self::Seq(seq),
            _ => Self::Id(trimmed.to_string()),
        }
    }
}

impl fmt::Display for ClipRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seq(seq) => write!(f, "#{seq}"),
            Self::Id(id) => f.write_str(id),
        }
    }
}

impl From<&str> for ClipRef {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}
