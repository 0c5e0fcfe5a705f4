//! Application layer for the Scoring context.

pub mod authorization;
pub mod command_handlers;
pub mod dispatcher;
pub mod query_handlers;
pub mod replies;
