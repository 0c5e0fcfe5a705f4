//! Chat administrator roster abstraction.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::identity::{ChatId, UserId};

/// Source of a chat's current administrators, usually the messaging platform.
#[async_trait]
pub trait AdminRoster: Send + Sync {
    /// Lists the administrators of `chat_id`.
    ///
    /// Implementations return `DomainError::RosterUnavailable` when the
    /// platform cannot be reached or refuses the request.
    async fn chat_administrators(&self, chat_id: ChatId) -> Result<Vec<UserId>, DomainError>;
}
