//! Command handlers for the Scoring context.
//!
//! Handlers check authorization first and only then touch the score store,
//! so a denied or slow roster lookup never holds a store lock.

use house_points_core::command::Command;
use house_points_core::error::DomainError;
use house_points_core::store::{HouseScore, ScoreStore};
use tracing::{info, instrument};

use crate::application::authorization::Authorizer;
use crate::domain::commands::AdjustPoints;

/// Handles `AdjustPoints`: authorizes the caller, applies the delta and
/// returns the house's new total.
///
/// # Errors
///
/// Returns `DomainError::Unauthorized` if the caller may not change points,
/// or whatever error the store reports while applying the delta.
#[instrument(
    skip(command, authorizer, store),
    fields(
        correlation_id = %command.correlation_id,
        command_type = command.command_type(),
        house = %command.house,
        delta = command.delta,
    )
)]
pub async fn handle_adjust_points(
    command: &AdjustPoints,
    authorizer: &Authorizer,
    store: &dyn ScoreStore,
) -> Result<HouseScore, DomainError> {
    if !authorizer.is_authorized(&command.identity).await {
        info!(user_id = %command.identity.user_id, "points change denied");
        return Err(DomainError::Unauthorized);
    }

    let points = store.apply_delta(&command.house, command.delta).await?;
    info!(total = points, "points changed");

    Ok(HouseScore {
        house: command.house.clone(),
        points,
    })
}
