//! Shared test doubles for the house points bot.

mod roster;
mod store;

pub use roster::{FailingAdminRoster, HangingAdminRoster, StaticAdminRoster};
pub use store::{FailingScoreStore, RecordingScoreStore};
