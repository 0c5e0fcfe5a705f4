//! Test stores — mock `ScoreStore` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use house_points_core::error::DomainError;
use house_points_core::house::{House, HouseRegistry};
use house_points_core::store::{HouseScore, ScoreStore, Standings};

/// A score store that keeps counters in memory and records every
/// `apply_delta` call, including rejected ones.
#[derive(Debug)]
pub struct RecordingScoreStore {
    registry: HouseRegistry,
    scores: Mutex<HashMap<House, i64>>,
    applied: Mutex<Vec<(String, i64)>>,
}

impl RecordingScoreStore {
    /// Create a store with every registry house at zero.
    #[must_use]
    pub fn new(registry: HouseRegistry) -> Self {
        let scores = registry.iter().map(|h| (h.clone(), 0)).collect();
        Self {
            registry,
            scores: Mutex::new(scores),
            applied: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of all `(house, delta)` pairs passed to `apply_delta`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn applied_deltas(&self) -> Vec<(String, i64)> {
        self.applied.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScoreStore for RecordingScoreStore {
    async fn initialize(&self) -> Result<(), DomainError> {
        Ok(())
    }

    async fn get_all(&self) -> Result<Standings, DomainError> {
        let scores = self.scores.lock().unwrap();
        Ok(Standings(
            self.registry
                .iter()
                .map(|h| HouseScore {
                    house: h.clone(),
                    points: scores[h],
                })
                .collect(),
        ))
    }

    async fn apply_delta(&self, house: &House, delta: i64) -> Result<i64, DomainError> {
        self.applied
            .lock()
            .unwrap()
            .push((house.as_str().to_owned(), delta));
        let mut scores = self.scores.lock().unwrap();
        let counter = scores
            .get_mut(house)
            .ok_or_else(|| DomainError::UnknownHouse(house.as_str().to_owned()))?;
        *counter += delta;
        Ok(*counter)
    }
}

/// A score store whose every operation fails with a persistence error.
/// Useful for testing error-handling paths.
#[derive(Debug)]
pub struct FailingScoreStore;

#[async_trait]
impl ScoreStore for FailingScoreStore {
    async fn initialize(&self) -> Result<(), DomainError> {
        Err(DomainError::Persistence("disk full".into()))
    }

    async fn get_all(&self) -> Result<Standings, DomainError> {
        Err(DomainError::Persistence("disk full".into()))
    }

    async fn apply_delta(&self, _house: &House, _delta: i64) -> Result<i64, DomainError> {
        Err(DomainError::Persistence("disk full".into()))
    }
}
