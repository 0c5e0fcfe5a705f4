//! Query handlers for the Scoring context.
//!
//! Queries read the score store and return read-only views. They need no
//! authorization.

use house_points_core::error::DomainError;
use house_points_core::store::{ScoreStore, Standings};
use serde::Serialize;

/// Read-only view of one house's score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HouseScoreView {
    /// Canonical house name.
    pub house: String,
    /// Capitalised name for display.
    pub display_name: String,
    /// Current points.
    pub points: i64,
}

/// Read-only view of all standings, in registry order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandingsView {
    /// One entry per registered house.
    pub houses: Vec<HouseScoreView>,
}

impl From<&Standings> for StandingsView {
    fn from(standings: &Standings) -> Self {
        Self {
            houses: standings
                .iter()
                .map(|s| HouseScoreView {
                    house: s.house.as_str().to_owned(),
                    display_name: s.house.display_name(),
                    points: s.points,
                })
                .collect(),
        }
    }
}

/// Returns the current score of every house.
///
/// # Errors
///
/// Returns `DomainError::Persistence` if the store cannot be read.
pub async fn get_standings(store: &dyn ScoreStore) -> Result<Standings, DomainError> {
    store.get_all().await
}

/// Returns the current standings as a view DTO.
///
/// # Errors
///
/// Returns `DomainError::Persistence` if the store cannot be read.
pub async fn get_standings_view(store: &dyn ScoreStore) -> Result<StandingsView, DomainError> {
    let standings = get_standings(store).await?;
    Ok(StandingsView::from(&standings))
}
