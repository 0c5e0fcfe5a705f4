//! Score store database schema.

/// SQL to create the scores table.
pub const CREATE_HOUSE_POINTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS house_points (
    house   TEXT PRIMARY KEY NOT NULL,
    points  INTEGER NOT NULL DEFAULT 0
)
";

/// Inserts a zeroed counter unless one already exists.
pub const INSERT_HOUSE_IF_ABSENT: &str =
    "INSERT OR IGNORE INTO house_points (house, points) VALUES (?, 0)";

/// Reads every counter.
pub const SELECT_ALL_POINTS: &str = "SELECT house, points FROM house_points";

/// Reads one counter.
pub const SELECT_POINTS: &str = "SELECT points FROM house_points WHERE house = ?";

/// Overwrites one counter.
pub const UPDATE_POINTS: &str = "UPDATE house_points SET points = ? WHERE house = ?";
