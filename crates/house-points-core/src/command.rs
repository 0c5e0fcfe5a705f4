//! Command abstractions.

use uuid::Uuid;

/// Trait implemented by every chat command the bot handles.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// The type name for this command (for logging/routing).
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this command through the system.
    fn correlation_id(&self) -> Uuid;

    /// Whether the command changes scores and therefore needs authorization.
    fn is_mutating(&self) -> bool;
}
