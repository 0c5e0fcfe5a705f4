//! House Points Core — shared domain abstractions.
//!
//! This crate defines the vocabulary every other crate speaks: houses and
//! their registry, requesting identities, the score store and admin roster
//! seams, and the domain error type. It contains no infrastructure code.

pub mod command;
pub mod error;
pub mod house;
pub mod identity;
pub mod roster;
pub mod store;
