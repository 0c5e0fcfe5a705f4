//! Configuration read from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use house_points_core::house::{DEFAULT_HOUSES, HouseRegistry};
use house_points_core::identity::UserId;
use house_points_scoring::application::authorization::DEFAULT_LOOKUP_TIMEOUT;

use crate::error::AppError;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SCORES_FILE: &str = "points.json";
const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Where scores are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreBackend {
    /// JSON file at the given path.
    File(PathBuf),
    /// `SQLite` database at the given URL.
    Sqlite(String),
    /// Process memory only.
    Memory,
}

/// Runtime configuration for the API server.
#[derive(Clone)]
pub struct Config {
    /// Telegram bot token.
    pub bot_token: String,
    /// Optional bot username; commands addressed to other bots are ignored.
    pub bot_username: Option<String>,
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Houses to keep score for.
    pub houses: HouseRegistry,
    /// Users allowed to change points anywhere.
    pub admin_user_ids: Vec<UserId>,
    /// Persistence backend.
    pub backend: ScoreBackend,
    /// Upper bound on an admin roster lookup.
    pub admin_lookup_timeout: Duration,
    /// Bot API base URL.
    pub telegram_api_url: String,
    /// Public base URL to register the webhook under, if any.
    pub webhook_url: Option<String>,
    /// Secret Telegram echoes in `X-Telegram-Bot-Api-Secret-Token`.
    pub webhook_secret: Option<String>,
    /// Last path segment of the webhook route.
    pub webhook_path_token: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bot_username", &self.bot_username)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("houses", &self.houses)
            .field("admin_user_ids", &self.admin_user_ids)
            .field("backend", &self.backend)
            .field("admin_lookup_timeout", &self.admin_lookup_timeout)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("webhook_url", &self.webhook_url)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// value cannot be parsed.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// value cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        let bot_token = get("BOT_TOKEN")
            .ok_or_else(|| AppError::Config("BOT_TOKEN environment variable must be set".into()))?;

        let port = match get("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => DEFAULT_PORT,
        };

        let houses = match get("HOUSES") {
            Some(raw) => HouseRegistry::new(raw.split(',').filter(|s| !s.trim().is_empty())),
            None => HouseRegistry::new(DEFAULT_HOUSES),
        }
        .map_err(|e| AppError::Config(format!("HOUSES: {e}")))?;

        let admin_user_ids = match get("ADMIN_USER_IDS") {
            Some(raw) => parse_user_ids(&raw)?,
            None => Vec::new(),
        };

        let backend = match get("SCORE_BACKEND").as_deref().unwrap_or("file") {
            "file" => ScoreBackend::File(
                get("SCORES_FILE")
                    .unwrap_or_else(|| DEFAULT_SCORES_FILE.to_owned())
                    .into(),
            ),
            "sqlite" => ScoreBackend::Sqlite(get("DATABASE_URL").ok_or_else(|| {
                AppError::Config("DATABASE_URL must be set when SCORE_BACKEND=sqlite".into())
            })?),
            "memory" => ScoreBackend::Memory,
            other => {
                return Err(AppError::Config(format!(
                    "SCORE_BACKEND must be file, sqlite or memory, got {other:?}"
                )));
            }
        };

        let admin_lookup_timeout = match get("ADMIN_LOOKUP_TIMEOUT_MS") {
            Some(raw) => Duration::from_millis(raw.parse().map_err(|e| {
                AppError::Config(format!("ADMIN_LOOKUP_TIMEOUT_MS must be milliseconds: {e}"))
            })?),
            None => DEFAULT_LOOKUP_TIMEOUT,
        };

        let webhook_path_token = get("WEBHOOK_PATH_TOKEN").unwrap_or_else(|| bot_token.clone());

        Ok(Self {
            bot_username: get("BOT_USERNAME").map(|u| u.trim_start_matches('@').to_owned()),
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port,
            houses,
            admin_user_ids,
            backend,
            admin_lookup_timeout,
            telegram_api_url: get("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_owned()),
            webhook_url: get("WEBHOOK_URL"),
            webhook_secret: get("WEBHOOK_SECRET"),
            webhook_path_token,
            bot_token,
        })
    }
}

fn parse_user_ids(raw: &str) -> Result<Vec<UserId>, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse().map(UserId).map_err(|e| {
                AppError::Config(format!("ADMIN_USER_IDS entry {s:?} is not a user id: {e}"))
            })
        })
        .collect()
}
