//! House Points Store — `ScoreStore` backends.
//!
//! Three interchangeable media sit behind the same trait: a JSON flat file,
//! an embedded `SQLite` table and a plain in-memory map.

pub mod json_file;
pub mod memory;
pub mod schema;
pub mod sqlite;

pub use json_file::JsonFileScoreStore;
pub use memory::InMemoryScoreStore;
pub use sqlite::SqliteScoreStore;

use house_points_core::error::DomainError;
use house_points_core::house::House;

/// Adds `delta` to `current`, refusing to wrap around.
pub(crate) fn checked_total(house: &House, current: i64, delta: i64) -> Result<i64, DomainError> {
    current
        .checked_add(delta)
        .ok_or_else(|| DomainError::ScoreOverflow {
            house: house.as_str().to_owned(),
            current,
            delta,
        })
}

pub(crate) fn missing_counter(house: &House) -> DomainError {
    DomainError::Persistence(format!(
        "no counter for house {house}; was the store initialized?"
    ))
}
