//! In-memory implementation of RateLimitRepository
//!
//! The whole reset-or-increment runs under one lock, mirroring the
//! single conditional upsert of the PostgreSQL backend.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use clipvote_core::entities::{RateLimitDecision, RateLimitWindow};
use clipvote_core::traits::{RateLimitRepository, RepoResult};
use clipvote_core::Handle;

use crate::repositories::rate_limit::decide;

/// In-memory implementation of RateLimitRepository
#[derive(Default)]
pub struct MemRateLimitRepository {
    windows: Mutex<HashMap<Handle, RateLimitWindow>>,
}

impl MemRateLimitRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RateLimitRepository for MemRateLimitRepository {
    async fn check_and_consume(
        &self,
        voter: &Handle,
        max_votes: i64,
        window_secs: i64,
        now: DateTime<Utc>,
    ) -> RepoResult<RateLimitDecision> {
        let mut windows = self.windows.lock();
        let window = windows
            .entry(voter.clone())
            .and_modify(|w| {
                if w.age_secs(now) >= window_secs {
                    *w = RateLimitWindow::fresh(voter.clone(), now);
                } else {
                    w.vote_count += 1;
                }
            })
            .or_insert_with(|| RateLimitWindow::fresh(voter.clone(), now));

        Ok(decide(window, max_votes, window_secs, now))
    }

    async fn clear(&self, voter: &Handle) -> RepoResult<()> {
        self.windows.lock().remove(voter);
        Ok(())
    }

    async fn purge_stale(&self, window_secs: i64, now: DateTime<Utc>) -> RepoResult<u64> {
        let mut windows = self.windows.lock();
        let before = windows.len();
        windows.retain(|_, w| w.age_secs(now) < window_secs);
        Ok((before - windows.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn voter() -> Handle {
        Handle::parse("viewer").unwrap()
    }

    #[tokio::test]
    async fn test_allows_up_to_cap_then_denies() {
        let repo = MemRateLimitRepository::new();
        let now = Utc::now();

        for _ in 0..30 {
            let decision = repo
                .check_and_consume(&voter(), 30, 300, now)
                .await
                .unwrap();
            assert!(decision.is_allowed());
        }

        match repo.check_and_consume(&voter(), 30, 300, now).await.unwrap() {
            RateLimitDecision::Denied { retry_after_secs } => {
                assert!(retry_after_secs >= 1 && retry_after_secs <= 300);
            }
            RateLimitDecision::Allowed => panic!("31st attempt should be denied"),
        }
    }

    #[tokio::test]
    async fn test_window_resets_after_expiry() {
        let repo = MemRateLimitRepository::new();
        let now = Utc::now();

        for _ in 0..31 {
            repo.check_and_consume(&voter(), 30, 300, now).await.unwrap();
        }

        let later = now + Duration::seconds(300);
        let decision = repo
            .check_and_consume(&voter(), 30, 300, later)
            .await
            .unwrap();
        assert!(decision.is_allowed());
    }

    #[tokio::test]
    async fn test_clear_resets_voter() {
        let repo = MemRateLimitRepository::new();
        let now = Utc::now();

        for _ in 0..31 {
            repo.check_and_consume(&voter(), 30, 300, now).await.unwrap();
        }
        repo.clear(&voter()).await.unwrap();

        let decision = repo.check_and_consume(&voter(), 30, 300, now).await.unwrap();
        assert!(decision.is_allowed());
    }

    #[tokio::test]
    async fn test_purge_stale() {
        let repo = MemRateLimitRepository::new();
        let now = Utc::now();

        repo.check_and_consume(&voter(), 30, 300, now).await.unwrap();
        let other = Handle::parse("other").unwrap();
        repo.check_and_consume(&other, 30, 300, now - Duration::seconds(600))
            .await
            .unwrap();

        let purged = repo.purge_stale(300, now).await.unwrap();
        assert_eq!(purged, 1);
    }
}
