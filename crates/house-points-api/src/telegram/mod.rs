//! Telegram Bot API transport: update payloads and an HTTP client.

mod client;
mod types;

pub use client::TelegramClient;
pub use types::{Chat, ChatMember, Message, ReplyParameters, SendMessage, Update, User};

use thiserror::Error;

/// Errors talking to the Bot API.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// The request could not be sent or the response could not be decoded.
    #[error("bot api request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The Bot API answered with `ok: false`.
    #[error("bot api method {method} failed: {description}")]
    Api {
        /// The Bot API method that was called.
        method: &'static str,
        /// Telegram's explanation.
        description: String,
    },
}
