//! Commands for the Scoring context.

use house_points_core::command::Command;
use house_points_core::house::House;
use house_points_core::identity::Identity;
use uuid::Uuid;

/// Which way a points adjustment goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Credit points to a house.
    Add,
    /// Take points away from a house.
    Subtract,
}

impl Direction {
    /// The chat command that triggers this direction, without the slash.
    #[must_use]
    pub fn command_name(self) -> &'static str {
        match self {
            Self::Add => "add_points",
            Self::Subtract => "subtract_points",
        }
    }
}

/// Command to add points to, or subtract points from, one house.
#[derive(Debug, Clone)]
pub struct AdjustPoints {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Who asked, and from which chat.
    pub identity: Identity,
    /// The house whose counter changes.
    pub house: House,
    /// The amount as typed by the user.
    pub amount: i64,
    /// Whether `amount` is credited or debited.
    pub direction: Direction,
    /// Signed change applied to the counter.
    pub delta: i64,
}

impl Command for AdjustPoints {
    fn command_type(&self) -> &'static str {
        match self.direction {
            Direction::Add => "scoring.add_points",
            Direction::Subtract => "scoring.subtract_points",
        }
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn is_mutating(&self) -> bool {
        true
    }
}

/// Command to list the current standings.
#[derive(Debug, Clone)]
pub struct ReportStandings {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for ReportStandings {
    fn command_type(&self) -> &'static str {
        "scoring.report"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn is_mutating(&self) -> bool {
        false
    }
}
