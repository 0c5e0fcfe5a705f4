//! House Points — Scoring bounded context.
//!
//! Turns chat commands into score changes: parses arguments, checks who may
//! change points, applies deltas through the score store and renders the
//! text replies sent back to the chat.

pub mod application;
pub mod domain;
