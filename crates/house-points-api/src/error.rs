//! House points API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use house_points_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;

use crate::telegram::TelegramError;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The score store could not be opened or initialized.
    #[error("store error: {0}")]
    Store(#[from] DomainError),

    /// The Telegram Bot API rejected a startup call.
    #[error("telegram error: {0}")]
    Telegram(#[from] TelegramError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer error that implements `IntoResponse`.
#[derive(Debug)]
pub enum ApiError {
    /// A domain error raised while serving the request.
    Domain(DomainError),
    /// The webhook path token did not match.
    UnknownWebhook,
    /// The webhook secret header was missing or wrong.
    InvalidSecret,
    /// The request body was not a valid update.
    MalformedUpdate(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            Self::UnknownWebhook => (StatusCode::NOT_FOUND, "not_found", "no such webhook".to_owned()),
            Self::InvalidSecret => (
                StatusCode::UNAUTHORIZED,
                "invalid_secret_token",
                "webhook secret token mismatch".to_owned(),
            ),
            Self::MalformedUpdate(reason) => (StatusCode::BAD_REQUEST, "malformed_update", reason),
            Self::Domain(err) => {
                let (status, code) = match &err {
                    DomainError::InvalidArguments(_) => (StatusCode::BAD_REQUEST, "validation_error"),
                    DomainError::Unauthorized => (StatusCode::FORBIDDEN, "unauthorized"),
                    DomainError::UnknownHouse(_) => (StatusCode::NOT_FOUND, "unknown_house"),
                    DomainError::ScoreOverflow { .. } => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "score_overflow")
                    }
                    DomainError::Persistence(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "persistence_error")
                    }
                    DomainError::RosterUnavailable(_) => (StatusCode::BAD_GATEWAY, "roster_unavailable"),
                    DomainError::InvalidConfiguration(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error")
                    }
                };
                (status, code, err.to_string())
            }
        };

        let body = ErrorBody {
            error: error_code,
            message,
        };

        (status, Json(body)).into_response()
    }
}
