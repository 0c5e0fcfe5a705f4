//! Text replies sent back to the chat.

use std::fmt::Write;

use house_points_core::house::HouseRegistry;
use house_points_core::store::{HouseScore, Standings};

use crate::domain::commands::Direction;

/// Reply when the caller may not change points.
pub const DENIED: &str = "⛔ Only chat administrators can change house points.";

/// Reply when a points change could not be applied.
pub const FAILURE: &str = "⚠️ Could not update the points right now. Please try again.";

/// Reply when the standings could not be read.
pub const READ_FAILURE: &str = "⚠️ Could not read the standings right now. Please try again.";

/// Usage hint naming the argument order and the valid houses.
#[must_use]
pub fn usage(direction: Direction, registry: &HouseRegistry) -> String {
    let houses: Vec<&str> = registry.iter().map(|h| h.as_str()).collect();
    format!(
        "Usage: /{} <amount> <house>\nHouses: {}",
        direction.command_name(),
        houses.join(", ")
    )
}

/// Confirmation of a points change, including the new total.
#[must_use]
pub fn adjusted(direction: Direction, amount: i64, score: &HouseScore) -> String {
    let house = score.house.display_name();
    match direction {
        Direction::Add => format!("✅ Added {amount} points to {house}.\nTotal: {}", score.points),
        Direction::Subtract => format!(
            "✅ Subtracted {amount} points from {house}.\nTotal: {}",
            score.points
        ),
    }
}

/// Listing of every house and its points, in registry order.
#[must_use]
pub fn standings(standings: &Standings) -> String {
    let mut text = String::from("🏆 Current standings:");
    for entry in standings.iter() {
        let _ = write!(text, "\n{}: {}", entry.house.display_name(), entry.points);
    }
    text
}

/// Overview of the available commands.
#[must_use]
pub fn help(registry: &HouseRegistry) -> String {
    let houses: Vec<String> = registry.iter().map(|h| h.display_name()).collect();
    format!(
        "🏰 House points bot\n\
         /add_points <amount> <house> - give points (admins)\n\
         /subtract_points <amount> <house> - take points (admins)\n\
         /report - show the standings\n\
         Houses: {}",
        houses.join(", ")
    )
}
