//! In-memory implementation of the `ScoreStore` trait.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use house_points_core::error::DomainError;
use house_points_core::house::{House, HouseRegistry};
use house_points_core::store::{HouseScore, ScoreStore, Standings};

use crate::{checked_total, missing_counter};

/// Non-durable score store. Scores are lost when the process exits.
#[derive(Debug)]
pub struct InMemoryScoreStore {
    registry: HouseRegistry,
    scores: Mutex<HashMap<House, i64>>,
}

impl InMemoryScoreStore {
    /// Creates an empty store; call [`ScoreStore::initialize`] before use.
    #[must_use]
    pub fn new(registry: HouseRegistry) -> Self {
        Self {
            registry,
            scores: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<House, i64>>, DomainError> {
        self.scores
            .lock()
            .map_err(|e| DomainError::Persistence(format!("score map mutex poisoned: {e}")))
    }
}

#[async_trait]
impl ScoreStore for InMemoryScoreStore {
    async fn initialize(&self) -> Result<(), DomainError> {
        let mut scores = self.lock()?;
        for house in &self.registry {
            scores.entry(house.clone()).or_insert(0);
        }
        Ok(())
    }

    async fn get_all(&self) -> Result<Standings, DomainError> {
        let scores = self.lock()?;
        self.registry
            .iter()
            .map(|house| {
                scores
                    .get(house)
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

        let mut scores = self.lock()?;
        let counter = scores.get_mut(house).ok_or_else(|| missing_counter(house))?;
        *counter = checked_total(house, *counter, delta)?;
        Ok(*counter)
    }
}
