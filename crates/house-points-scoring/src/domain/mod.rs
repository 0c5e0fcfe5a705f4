//! Domain layer for the Scoring context.

pub mod commands;
pub mod parsing;
