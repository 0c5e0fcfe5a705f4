//! Telegram webhook endpoint.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use subtle::ConstantTimeEq;
use tracing::{debug, info, instrument, warn};

use crate::error::ApiError;
use crate::state::AppState;
use crate::telegram::{SendMessage, Update};

/// Header Telegram uses to echo the secret given to `setWebhook`.
pub const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

/// POST /webhook/{token}
///
/// Answers with an inline `sendMessage` call when the update produced a
/// reply, otherwise with an empty 200.
#[instrument(skip_all)]
async fn receive_update(
    State(state): State<AppState>,
    Path(token): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    if !credentials_match(token.as_bytes(), state.webhook.path_token.as_bytes()) {
        warn!("update posted to unknown webhook path");
        return Err(ApiError::UnknownWebhook);
    }

    if let Some(expected) = state.webhook.secret_token.as_deref() {
        let presented = headers
            .get(SECRET_TOKEN_HEADER)
            .map_or(&[][..], |value| value.as_bytes());
        if !credentials_match(presented, expected.as_bytes()) {
            warn!("webhook secret token mismatch");
            return Err(ApiError::InvalidSecret);
        }
    }

    let update: Update =
        serde_json::from_slice(&body).map_err(|e| ApiError::MalformedUpdate(e.to_string()))?;

    let Some(message) = update.message else {
        debug!(update_id = update.update_id, "update carries no message");
        return Ok(StatusCode::OK.into_response());
    };
    let (Some(text), Some(identity)) = (message.text.as_deref(), message.identity()) else {
        return Ok(StatusCode::OK.into_response());
    };
    match state.dispatcher.dispatch(text, identity).await {
        Some(reply) => {
            info!(
                update_id = update.update_id,
                chat_id = message.chat.id,
                "replying to command"
            );
            Ok(Json(SendMessage::reply_to(&message, reply)).into_response())
        }
        None => Ok(StatusCode::OK.into_response()),
    }
}

/// Compares a presented credential with the configured one in constant time.
fn credentials_match(presented: &[u8], expected: &[u8]) -> bool {
    presented.ct_eq(expected).into()
}

/// Returns the webhook router.
pub fn router() -> Router<AppState> {
    Router::new().route("/webhook/{token}", post(receive_update))
}

#[cfg(test)]
mod tests {
    use super::credentials_match;

    #[test]
    fn test_credentials_match_requires_identical_bytes() {
        assert!(credentials_match(b"123:abc", b"123:abc"));
        assert!(!credentials_match(b"123:abd", b"123:abc"));
        assert!(!credentials_match(b"123:ab", b"123:abc"));
        assert!(!credentials_match(b"", b"123:abc"));
    }
}
