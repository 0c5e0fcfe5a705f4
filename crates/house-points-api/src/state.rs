//! Shared application state.

use std::sync::Arc;

use house_points_scoring::application::dispatcher::Dispatcher;

/// How the webhook route authenticates Telegram.
#[derive(Clone)]
pub struct WebhookSettings {
    /// Required last path segment of the webhook URL.
    pub path_token: String,
    /// Expected `X-Telegram-Bot-Api-Secret-Token` header, if configured.
    pub secret_token: Option<String>,
}

impl std::fmt::Debug for WebhookSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookSettings")
            .field("secret_token", &self.secret_token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Routes command text to the scoring handlers.
    pub dispatcher: Arc<Dispatcher>,
    /// Webhook authentication settings.
    pub webhook: Arc<WebhookSettings>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(dispatcher: Dispatcher, webhook: WebhookSettings) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            webhook: Arc::new(webhook),
        }
    }
}
