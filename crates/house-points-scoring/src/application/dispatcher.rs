//! Command dispatcher: chat text in, reply text out.
//!
//! Every invocation runs parse, authorize, execute and reply in that order.
//! Errors never escape; each one maps to a fixed reply.

use std::sync::Arc;

use house_points_core::command::Command;
use house_points_core::error::DomainError;
use house_points_core::house::HouseRegistry;
use house_points_core::identity::Identity;
use house_points_core::store::ScoreStore;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::application::authorization::Authorizer;
use crate::application::{command_handlers, query_handlers, replies};
use crate::domain::commands::{Direction, ReportStandings};
use crate::domain::parsing::{CommandName, parse_adjustment, parse_invocation};

/// Routes chat commands to the scoring handlers.
pub struct Dispatcher {
    registry: HouseRegistry,
    store: Arc<dyn ScoreStore>,
    authorizer: Arc<Authorizer>,
    bot_username: Option<String>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .field("authorizer", &self.authorizer)
            .field("bot_username", &self.bot_username)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Creates a dispatcher over the given registry, store and authorizer.
    #[must_use]
    pub fn new(
        registry: HouseRegistry,
        store: Arc<dyn ScoreStore>,
        authorizer: Arc<Authorizer>,
    ) -> Self {
        Self {
            registry,
            store,
            authorizer,
            bot_username: None,
        }
    }

    /// Ignores commands explicitly addressed to a different bot
    /// (`/report@other_bot`).
    #[must_use]
    pub fn with_bot_username(mut self, username: impl Into<String>) -> Self {
        self.bot_username = Some(username.into());
        self
    }

    /// The house registry commands are validated against.
    #[must_use]
    pub fn registry(&self) -> &HouseRegistry {
        &self.registry
    }

    /// The score store commands read and write.
    #[must_use]
    pub fn store(&self) -> &dyn ScoreStore {
        self.store.as_ref()
    }

    /// Handles one chat message.
    ///
    /// Returns `None` when the text is not a command for this bot, otherwise
    /// the reply to send back.
    #[instrument(skip(self, text), fields(user_id = %identity.user_id, chat_id = %identity.chat_id))]
    pub async fn dispatch(&self, text: &str, identity: Identity) -> Option<String> {
        let invocation = parse_invocation(text)?;

        if let (Some(addressee), Some(me)) = (invocation.addressee, self.bot_username.as_deref())
        {
            if !addressee.eq_ignore_ascii_case(me) {
                debug!(addressee, "command addressed to another bot");
                return None;
            }
        }

        let reply = match (invocation.name, invocation.name.direction()) {
            (_, Some(direction)) => self.adjust(direction, &invocation.args, identity).await,
            (CommandName::Report, None) => self.report().await,
            (_, None) => replies::help(&self.registry),
        };
        Some(reply)
    }

    async fn report(&self) -> String {
        let command = ReportStandings {
            correlation_id: Uuid::new_v4(),
        };
        info!(
            correlation_id = %command.correlation_id,
            command_type = command.command_type(),
            mutating = command.is_mutating(),
            "handling report command"
        );

        match query_handlers::get_standings(self.store.as_ref()).await {
            Ok(standings) => replies::standings(&standings),
            Err(e) => {
                error!(correlation_id = %command.correlation_id, error = %e, "failed to read standings");
                replies::READ_FAILURE.to_owned()
            }
        }
    }

    async fn adjust(&self, direction: Direction, args: &[&str], identity: Identity) -> String {
        let command = match parse_adjustment(direction, args, identity, &self.registry) {
            Ok(command) => command,
            Err(e) => {
                debug!(error = %e, "rejected command arguments");
                return replies::usage(direction, &self.registry);
            }
        };

        info!(
            correlation_id = %command.correlation_id,
            command_type = command.command_type(),
            mutating = command.is_mutating(),
            "handling points command"
        );

        match command_handlers::handle_adjust_points(&command, &self.authorizer, self.store.as_ref())
            .await
        {
            Ok(score) => replies::adjusted(direction, command.amount, &score),
            Err(DomainError::Unauthorized) => replies::DENIED.to_owned(),
            Err(DomainError::InvalidArguments(reason)) => {
                warn!(correlation_id = %command.correlation_id, reason = %reason, "store rejected arguments");
                replies::usage(direction, &self.registry)
            }
            Err(e @ DomainError::UnknownHouse(_)) => {
                error!(
                    correlation_id = %command.correlation_id,
                    error = %e,
                    "validated house missing from store registry"
                );
                replies::FAILURE.to_owned()
            }
            Err(e) => {
                error!(correlation_id = %command.correlation_id, error = %e, "failed to change points");
                replies::FAILURE.to_owned()
            }
        }
    }
}
