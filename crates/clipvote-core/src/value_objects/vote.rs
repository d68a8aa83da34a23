//! Vote value objects - directions, requested votes, and result actions

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The direction a ledger entry currently points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    /// Get the canonical string form ("up" / "down")
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// The other direction
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VoteDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(DomainError::InvalidVoteType(other.to_string())),
        }
    }
}

/// What the caller asked for in a vote submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestedVote {
    Like,
    Dislike,
    Clear,
}

impl RequestedVote {
    /// Map the request to a ledger direction; `Clear` has none
    #[must_use]
    pub fn direction(self) -> Option<VoteDirection> {
        match self {
            Self::Like => Some(VoteDirection::Up),
            Self::Dislike => Some(VoteDirection::Down),
            Self::Clear => None,
        }
    }

    /// Get the canonical string form
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
            Self::Clear => "clear",
        }
    }
}

impl fmt::Display for RequestedVote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RequestedVote {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            "clear" => Ok(Self::Clear),
            other => Err(DomainError::InvalidVoteType(other.to_string())),
        }
    }
}

/// What a vote submission did to the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteAction {
    /// First vote on this clip by this voter
    Recorded,
    /// Existing vote switched direction
    Changed,
    /// Existing vote already pointed this way, nothing touched
    Unchanged,
    /// Vote removed (or there was nothing to remove)
    Cleared,
}

impl VoteAction {
    /// Get the canonical string form
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recorded => "recorded",
            Self::Changed => "changed",
            Self::Unchanged => "unchanged",
            Self::Cleared => "cleared",
        }
    }
}

impl fmt::Display for VoteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
