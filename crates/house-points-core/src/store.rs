//! Score store abstraction.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::DomainError;
use crate::house::House;

/// One house and its current score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HouseScore {
    /// The house.
    pub house: House,
    /// Its current points. May be negative.
    pub points: i64,
}

/// Snapshot of every counter, in registry order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Standings(pub Vec<HouseScore>);

impl Standings {
    /// Points for `house`, if it is part of the snapshot.
    #[must_use]
    pub fn points_of(&self, house: &str) -> Option<i64> {
        self.0
            .iter()
            .find(|s| s.house.as_str() == house)
            .map(|s| s.points)
    }

    /// Iterates over the entries in registry order.
    pub fn iter(&self) -> std::slice::Iter<'_, HouseScore> {
        self.0.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Durable mapping from house to integer score.
///
/// Implementations own a copy of the house registry they were built with.
/// Every successful mutation is persisted before it returns, and a failed
/// mutation leaves both the persisted and any cached value untouched.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Ensures every registry house has a counter, leaving existing ones as
    /// they are. Safe to call on every start.
    async fn initialize(&self) -> Result<(), DomainError>;

    /// Returns one entry per registry house, in registry order.
    async fn get_all(&self) -> Result<Standings, DomainError>;

    /// Adds `delta` to the house's counter and returns the new total.
    ///
    /// Concurrent calls never lose a delta.
    async fn apply_delta(&self, house: &House, delta: i64) -> Result<i64, DomainError>;
}
