//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; those carrying free-form
//! input also implement `Validate`.

use serde::Deserialize;
use validator::Validate;

/// Vote submission body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitVoteRequest {
    /// "like", "dislike" or "clear"
    #[validate(length(min = 1, max = 16, message = "Vote type must be 1-16 characters"))]
    pub vote: String,
}

/// Query string for batch vote counts
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VoteCountsQuery {
    /// Comma-separated clip references (sequence numbers or external ids)
    #[validate(length(min = 1, max = 2000, message = "Clip list must be 1-2000 characters"))]
    pub clips: String,
}

impl VoteCountsQuery {
    /// Split the raw clip list, dropping empty segments
    #[must_use]
    pub fn refs(&self) -> Vec<&str> {
        self.clips
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Query string for the admin voter listing
#[derive(Debug, Clone, Copy, Deserialize, Default)]
pub struct ListVotersQuery {
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_counts_query_refs() {
        let query = VoteCountsQuery {
            clips: "1, 2,,AbcDef ,".to_string(),
        };
        assert_eq!(query.refs(), vec!["1", "2", "AbcDef"]);
    }

    #[test]
    fn test_submit_vote_validation() {
        let request = SubmitVoteRequest {
            vote: String::new(),
        };
        assert!(request.validate().is_err());

        let request = SubmitVoteRequest {
            vote: "like".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}
