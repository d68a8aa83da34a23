//! Rate limit window - fixed-window vote attempt counter per voter

use chrono::{DateTime, Utc};

use crate::value_objects::Handle;

/// Fixed-size window state for one voter.
///
/// A window resets (count back to 1) when its age reaches the
/// configured length. O(1) state per voter; bursts at window
/// boundaries are an accepted tradeoff of the fixed-window scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitWindow {
    pub voter: Handle,
    pub vote_count: i64,
    pub window_start: DateTime<Utc>,
}

impl RateLimitWindow {
    /// Start a fresh window with one consumed slot
    pub fn fresh(voter: Handle, now: DateTime<Utc>) -> Self {
        Self {
            voter,
            vote_count: 1,
            window_start: now,
        }
    }

    /// Age of the window in whole seconds at `now`
    pub fn age_secs(&self, now: DateTime<Utc>) -> i64 {
        (now - self.window_start).num_seconds()
    }
}

/// Outcome of a rate limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed,
    Denied { retry_after_secs: i64 },
}

impl RateLimitDecision {
    /// Whether the attempt may proceed
    #[inline]
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}
