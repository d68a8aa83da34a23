//! Aggregate count - denormalized per-clip vote totals

use chrono::{DateTime, Utc};

use crate::value_objects::Handle;

/// Per-clip up/down totals derived from the ledger.
///
/// Created lazily on a clip's first vote. Counts never go negative:
/// every decrement clamps at zero, enforced by the stores themselves
/// so no caller bug can drive a total below zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateCount {
    pub channel_login: Handle,
    pub clip_id: String,
    pub up_votes: i64,
    pub down_votes: i64,
    pub updated_at: DateTime<Utc>,
}

impl AggregateCount {
    /// Create a zeroed aggregate for a clip
    pub fn zero(channel_login: Handle, clip_id: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            channel_login,
            clip_id: clip_id.into(),
            up_votes: 0,
            down_votes: 0,
            updated_at: at,
        }
    }

    /// Apply signed deltas, clamping both totals at zero
    pub fn apply_delta(&mut self, up: i64, down: i64, at: DateTime<Utc>) {
        self.up_votes = (self.up_votes + up).max(0);
        self.down_votes = (self.down_votes + down).max(0);
        self.updated_at = at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agg() -> AggregateCount {
        AggregateCount::zero(Handle::parse("streamer").unwrap(), "clip1", Utc::now())
    }

    #[test]
    fn test_apply_delta() {
        let mut counts = agg();
        counts.apply_delta(1, 0, Utc::now());
        counts.apply_delta(0, 1, Utc::now());
        assert_eq!(counts.up_votes, 1);
        assert_eq!(counts.down_votes, 1);
    }

    #[test]
    fn test_decrement_clamps_at_zero() {
        let mut counts = agg();
        counts.apply_delta(-5, -1, Utc::now());
        assert_eq!(counts.up_votes, 0);
        assert_eq!(counts.down_votes, 0);
    }
}
