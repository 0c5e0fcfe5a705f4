//! HTTP client for the Telegram Bot API.

use std::time::Duration;

use async_trait::async_trait;
use house_points_core::error::DomainError;
use house_points_core::identity::{ChatId, UserId};
use house_points_core::roster::AdminRoster;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info, instrument};

use super::TelegramError;
use super::types::ChatMember;

/// Envelope every Bot API response is wrapped in.
#[derive(Debug, serde::Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

/// Bot API client. Also serves as the admin roster for authorization.
#[derive(Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl TelegramClient {
    /// Creates a client for the bot identified by `token`.
    ///
    /// # Errors
    ///
    /// Returns `TelegramError::Http` if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        request_timeout: Duration,
    ) -> Result<Self, TelegramError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            token: token.into(),
        })
    }

    /// Registers `url` as the bot's webhook.
    ///
    /// # Errors
    ///
    /// Returns `TelegramError` if the request fails or Telegram refuses it.
    #[instrument(skip(self, secret_token))]
    pub async fn set_webhook(
        &self,
        url: &str,
        secret_token: Option<&str>,
    ) -> Result<(), TelegramError> {
        let mut body = json!({
            "url": url,
            "allowed_updates": ["message"],
        });
        if let Some(secret) = secret_token {
            body["secret_token"] = json!(secret);
        }

        let _: bool = self.call("setWebhook", &body).await?;
        info!("webhook registered");
        Ok(())
    }

    async fn call<B, T>(&self, method: &'static str, body: &B) -> Result<T, TelegramError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        // The URL embeds the bot token; keep it out of error messages.
        let url = format!("{}/bot{}/{method}", self.base_url, self.token);
        let response: ApiResponse<T> = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?
            .json()
            .await
            .map_err(reqwest::Error::without_url)?;

        match response {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            ApiResponse { description, .. } => Err(TelegramError::Api {
                method,
                description: description.unwrap_or_else(|| "no result".to_owned()),
            }),
        }
    }
}

#[async_trait]
impl AdminRoster for TelegramClient {
    #[instrument(skip(self))]
    async fn chat_administrators(&self, chat_id: ChatId) -> Result<Vec<UserId>, DomainError> {
        let members: Vec<ChatMember> = self
            .call("getChatAdministrators", &json!({ "chat_id": chat_id.0 }))
            .await
            .map_err(|e| DomainError::RosterUnavailable(e.to_string()))?;

        debug!(count = members.len(), "fetched chat administrators");
        Ok(members.into_iter().map(|m| UserId(m.user.id)).collect())
    }
}
