//! Parsing of raw chat text into commands.

use house_points_core::error::DomainError;
use house_points_core::house::HouseRegistry;
use house_points_core::identity::Identity;
use uuid::Uuid;

use super::commands::{AdjustPoints, Direction};

/// Commands the bot recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandName {
    /// `/add_points <amount> <house>`
    AddPoints,
    /// `/subtract_points <amount> <house>`
    SubtractPoints,
    /// `/report`
    Report,
    /// `/help` or `/start`
    Help,
}

impl CommandName {
    /// Maps a normalised command word (lowercase, `_` separated, no slash)
    /// to a command.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "add_points" | "add" => Some(Self::AddPoints),
            "subtract_points" | "subtract" | "remove_points" => Some(Self::SubtractPoints),
            "report" | "points" | "standings" => Some(Self::Report),
            "help" | "start" => Some(Self::Help),
            _ => None,
        }
    }

    /// The adjustment direction for mutating commands.
    #[must_use]
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::AddPoints => Some(Direction::Add),
            Self::SubtractPoints => Some(Direction::Subtract),
            Self::Report | Self::Help => None,
        }
    }
}

/// A recognised command word plus its positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<'a> {
    /// The command.
    pub name: CommandName,
    /// Bot username the command was addressed to (`/report@house_bot`).
    pub addressee: Option<&'a str>,
    /// Whitespace-separated arguments after the command word.
    pub args: Vec<&'a str>,
}

/// Splits a message into a command and arguments.
///
/// Returns `None` for text that is not a slash command or names a command
/// the bot does not know. Hyphens in the command word are read as
/// underscores, so `/add-points` and `/add_points` are the same command.
#[must_use]
pub fn parse_invocation(text: &str) -> Option<Invocation<'_>> {
    let mut parts = text.split_whitespace();
    let head = parts.next()?.strip_prefix('/')?;

    let (word, addressee) = match head.split_once('@') {
        Some((word, bot)) => (word, Some(bot)),
        None => (head, None),
    };
    let normalised = word.to_lowercase().replace('-', "_");
    let name = CommandName::from_word(&normalised)?;

    Some(Invocation {
        name,
        addressee,
        args: parts.collect(),
    })
}

/// Validates the arguments of an add/subtract command.
///
/// Expects exactly `<amount> <house>`: a signed integer followed by a house
/// name matched case-insensitively against `registry`.
///
/// # Errors
///
/// Returns `DomainError::InvalidArguments` if the argument count is wrong,
/// the amount is not an integer, the house is not registered, or the amount
/// cannot be negated.
pub fn parse_adjustment(
    direction: Direction,
    args: &[&str],
    identity: Identity,
    registry: &HouseRegistry,
) -> Result<AdjustPoints, DomainError> {
    let [raw_amount, raw_house] = args else {
        return Err(DomainError::InvalidArguments(format!(
            "expected 2 arguments, got {}",
            args.len()
        )));
    };

    let amount: i64 = raw_amount.parse().map_err(|_| {
        DomainError::InvalidArguments(format!("{raw_amount:?} is not a whole number"))
    })?;

    let house = registry
        .resolve(raw_house)
        .ok_or_else(|| DomainError::InvalidArguments(format!("{raw_house:?} is not a house")))?
        .clone();

    let delta = match direction {
        Direction::Add => amount,
        Direction::Subtract => amount.checked_neg().ok_or_else(|| {
            DomainError::InvalidArguments(format!("{amount} cannot be subtracted"))
        })?,
    };

    Ok(AdjustPoints {
        correlation_id: Uuid::new_v4(),
        identity,
        house,
        amount,
        direction,
        delta,
    })
}
