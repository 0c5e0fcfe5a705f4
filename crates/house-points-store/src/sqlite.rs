//! `SQLite` implementation of the `ScoreStore` trait.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::sync::Mutex;
use tracing::{debug, info};

use house_points_core::error::DomainError;
use house_points_core::house::{House, HouseRegistry};
use house_points_core::store::{HouseScore, ScoreStore, Standings};

use crate::schema;
use crate::{checked_total, missing_counter};

/// SQLite-backed score store.
///
/// Each mutation is a read-modify-write inside one transaction, taken under
/// a process-wide lock so concurrent deltas are never lost.
#[derive(Debug)]
pub struct SqliteScoreStore {
    pool: SqlitePool,
    registry: HouseRegistry,
    write_lock: Mutex<()>,
}

impl SqliteScoreStore {
    /// Creates a store over an existing pool.
    #[must_use]
    pub fn new(pool: SqlitePool, registry: HouseRegistry) -> Self {
        Self {
            pool,
            registry,
            write_lock: Mutex::new(()),
        }
    }

    /// Connects to a database URL such as `sqlite://points.db`, creating the
    /// file if needed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Persistence` if the URL is invalid or the
    /// database cannot be opened.
    pub async fn connect(url: &str, registry: HouseRegistry) -> Result<Self, DomainError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(db_error)?
            .create_if_missing(true);
        Self::connect_with(options, registry).await
    }

    /// Opens (or creates) the database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Persistence` if the database cannot be opened.
    pub async fn open(path: &Path, registry: HouseRegistry) -> Result<Self, DomainError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        Self::connect_with(options, registry).await
    }

    async fn connect_with(
        options: SqliteConnectOptions,
        registry: HouseRegistry,
    ) -> Result<Self, DomainError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(db_error)?;
        Ok(Self::new(pool, registry))
    }
}

fn db_error(err: sqlx::Error) -> DomainError {
    DomainError::Persistence(format!("database error: {err}"))
}

#[async_trait]
impl ScoreStore for SqliteScoreStore {
    async fn initialize(&self) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        sqlx::query(schema::CREATE_HOUSE_POINTS_TABLE)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        let mut created = 0_u64;
        for house in &self.registry {
            created += sqlx::query(schema::INSERT_HOUSE_IF_ABSENT)
                .bind(house.as_str())
                .execute(&mut *tx)
                .await
                .map_err(db_error)?
                .rows_affected();
        }

        tx.commit().await.map_err(db_error)?;
        info!(created, "score table ready");
        Ok(())
    }

    async fn get_all(&self) -> Result<Standings, DomainError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(schema::SELECT_ALL_POINTS)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;
        let by_house: HashMap<String, i64> = rows.into_iter().collect();

        self.registry
            .iter()
            .map(|house| {
                by_house
                    .get(house.as_str())
                    .map(|&points| HouseScore {
                        house: house.clone(),
                        points,
                    })
                    .ok_or_else(|| missing_counter(house))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Standings)
    }

    async fn apply_delta(&self, house: &House, delta: i64) -> Result<i64, DomainError> {
        if !self.registry.contains(house) {
            return Err(DomainError::UnknownHouse(house.as_str().to_owned()));
        }

        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let current: i64 = sqlx::query_scalar(schema::SELECT_POINTS)
            .bind(house.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error)?
            .ok_or_else(|| missing_counter(house))?;
        let updated = checked_total(house, current, delta)?;

        sqlx::query(schema::UPDATE_POINTS)
            .bind(updated)
            .bind(house.as_str())
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        // Dropping an uncommitted transaction rolls it back.
        tx.commit().await.map_err(db_error)?;

        debug!(house = %house, delta, total = updated, "score persisted");
        Ok(updated)
    }
}
