//! Test rosters — mock `AdminRoster` implementations for tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use house_points_core::error::DomainError;
use house_points_core::identity::{ChatId, UserId};
use house_points_core::roster::AdminRoster;

/// A roster that reports the same administrators for every chat and counts
/// how often it was asked.
#[derive(Debug, Default)]
pub struct StaticAdminRoster {
    admins: Vec<UserId>,
    lookups: AtomicUsize,
}

impl StaticAdminRoster {
    /// Create a roster listing `admins` as administrators of every chat.
    #[must_use]
    pub fn new(admins: &[i64]) -> Self {
        Self {
            admins: admins.iter().copied().map(UserId).collect(),
            lookups: AtomicUsize::new(0),
        }
    }

    /// Number of `chat_administrators` calls made so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AdminRoster for StaticAdminRoster {
    async fn chat_administrators(&self, _chat_id: ChatId) -> Result<Vec<UserId>, DomainError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.admins.clone())
    }
}

/// A roster whose lookups always fail, as when the platform API is down.
#[derive(Debug)]
pub struct FailingAdminRoster;

#[async_trait]
impl AdminRoster for FailingAdminRoster {
    async fn chat_administrators(&self, _chat_id: ChatId) -> Result<Vec<UserId>, DomainError> {
        Err(DomainError::RosterUnavailable("connection refused".into()))
    }
}

/// A roster whose lookups never complete. Pair with a short lookup timeout.
#[derive(Debug)]
pub struct HangingAdminRoster;

#[async_trait]
impl AdminRoster for HangingAdminRoster {
    async fn chat_administrators(&self, _chat_id: ChatId) -> Result<Vec<UserId>, DomainError> {
        std::future::pending().await
    }
}
