//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Command arguments were missing, malformed or named an unknown house.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// The requesting identity may not mutate scores.
    #[error("not authorized to change house points")]
    Unauthorized,

    /// A store was asked about a house outside its registry.
    #[error("unknown house: {0}")]
    UnknownHouse(String),

    /// Applying the delta would overflow the counter.
    #[error("score overflow on house {house}: {current} + {delta}")]
    ScoreOverflow {
        /// The house whose counter would overflow.
        house: String,
        /// The counter value before the delta.
        current: i64,
        /// The rejected delta.
        delta: i64,
    },

    /// The backing storage medium could not be read or written.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// The chat administrator roster could not be fetched.
    #[error("admin roster unavailable: {0}")]
    RosterUnavailable(String),

    /// Configuration handed to a domain type was unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
