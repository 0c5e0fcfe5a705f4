//! Requesting identities and the chat context a command arrives in.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Platform-assigned numeric user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Platform-assigned numeric chat identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of conversation a command was issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    /// One-to-one conversation with the bot.
    Private,
    /// Basic group.
    Group,
    /// Supergroup.
    Supergroup,
    /// Broadcast channel.
    Channel,
}

impl ChatKind {
    /// Whether the chat has an administrator roster worth consulting.
    #[must_use]
    pub fn is_group(self) -> bool {
        matches!(self, Self::Group | Self::Supergroup)
    }
}

/// Who issued a command and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    /// The requesting user.
    pub user_id: UserId,
    /// The chat the command was sent in.
    pub chat_id: ChatId,
    /// The kind of that chat.
    pub chat_kind: ChatKind,
}

impl Identity {
    /// Identity of a user talking to the bot directly.
    #[must_use]
    pub fn private(user_id: i64) -> Self {
        Self {
            user_id: UserId(user_id),
            chat_id: ChatId(user_id),
            chat_kind: ChatKind::Private,
        }
    }

    /// Identity of a user inside a (super)group chat.
    #[must_use]
    pub fn in_group(user_id: i64, chat_id: i64) -> Self {
        Self {
            user_id: UserId(user_id),
            chat_id: ChatId(chat_id),
            chat_kind: ChatKind::Supergroup,
        }
    }
}
