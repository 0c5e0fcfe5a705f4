//! House Points API — HTTP transport for the house points bot.
//!
//! Receives Telegram webhook updates, hands command text to the scoring
//! dispatcher and answers with the reply inline in the webhook response.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telegram;

use std::sync::Arc;

use house_points_core::store::ScoreStore;
use house_points_store::{InMemoryScoreStore, JsonFileScoreStore, SqliteScoreStore};

use crate::config::{Config, ScoreBackend};
use crate::error::AppError;

/// Builds the score store selected by configuration. The store is not yet
/// initialized.
///
/// # Errors
///
/// Returns `AppError::Store` if the `SQLite` database cannot be opened.
pub async fn build_store(config: &Config) -> Result<Arc<dyn ScoreStore>, AppError> {
    let houses = config.houses.clone();
    let store: Arc<dyn ScoreStore> = match &config.backend {
        ScoreBackend::File(path) => Arc::new(JsonFileScoreStore::new(path.clone(), houses)),
        ScoreBackend::Sqlite(url) => Arc::new(SqliteScoreStore::connect(url, houses).await?),
        ScoreBackend::Memory => Arc::new(InMemoryScoreStore::new(houses)),
    };
    Ok(store)
}
