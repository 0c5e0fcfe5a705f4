//! Bot API payloads. Only the fields the bot reads are modelled; serde
//! ignores the rest.

use house_points_core::identity::{ChatId, ChatKind, Identity, UserId};
use serde::{Deserialize, Serialize};

/// An incoming update delivered to the webhook.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    /// Monotonic update identifier.
    pub update_id: i64,
    /// A new message, if this update carries one.
    #[serde(default)]
    pub message: Option<Message>,
}

/// A chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    /// Message identifier within the chat.
    pub message_id: i64,
    /// Sender; absent for channel posts.
    #[serde(default)]
    pub from: Option<User>,
    /// Chat the message was sent in.
    pub chat: Chat,
    /// Text content, if any.
    #[serde(default)]
    pub text: Option<String>,
}

impl Message {
    /// The identity of the sender in this chat, if there is a sender.
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.from.as_ref().map(|user| Identity {
            user_id: UserId(user.id),
            chat_id: ChatId(self.chat.id),
            chat_kind: self.chat.kind,
        })
    }
}

/// A Telegram user or bot. Anonymous group admins arrive as the
/// `GroupAnonymousBot` user, which is never on a roster.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    /// User identifier.
    pub id: i64,
}

/// A chat.
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    /// Chat identifier.
    pub id: i64,
    /// Private, group, supergroup or channel.
    #[serde(rename = "type")]
    pub kind: ChatKind,
}

/// One entry of `getChatAdministrators`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMember {
    /// The member.
    pub user: User,
}

/// Which message a reply answers.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyParameters {
    /// The message being answered.
    pub message_id: i64,
    /// Still send the reply if the original message was deleted.
    pub allow_sending_without_reply: bool,
}

/// A `sendMessage` call, returned inline as the webhook response.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessage {
    /// Always `sendMessage`.
    pub method: &'static str,
    /// Target chat.
    pub chat_id: i64,
    /// Reply text.
    pub text: String,
    /// The command message being answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_parameters: Option<ReplyParameters>,
}

impl SendMessage {
    /// A reply to `message` with `text`.
    #[must_use]
    pub fn reply_to(message: &Message, text: String) -> Self {
        Self {
            method: "sendMessage",
            chat_id: message.chat.id,
            text,
            reply_parameters: Some(ReplyParameters {
                message_id: message.message_id,
                allow_sending_without_reply: true,
            }),
        }
    }
}
