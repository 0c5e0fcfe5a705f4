//! Authorization check for score-changing commands.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use house_points_core::identity::{Identity, UserId};
use house_points_core::roster::AdminRoster;
use tracing::{debug, instrument, warn};

/// Default upper bound on an administrator roster lookup.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

/// Decides whether an identity may add or subtract points.
///
/// Allow-listed users may always mutate. Anyone else must be an
/// administrator of the group chat the command came from. The roster is
/// fetched on every call; a failed or timed-out lookup denies access.
pub struct Authorizer {
    allow_list: HashSet<UserId>,
    roster: Arc<dyn AdminRoster>,
    lookup_timeout: Duration,
}

impl std::fmt::Debug for Authorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authorizer")
            .field("allow_list", &self.allow_list)
            .field("lookup_timeout", &self.lookup_timeout)
            .finish_non_exhaustive()
    }
}

impl Authorizer {
    /// Creates an authorizer over a fixed allow-list and a roster source.
    #[must_use]
    pub fn new(
        allow_list: impl IntoIterator<Item = UserId>,
        roster: Arc<dyn AdminRoster>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            allow_list: allow_list.into_iter().collect(),
            roster,
            lookup_timeout,
        }
    }

    /// Whether `identity` may mutate scores right now.
    #[instrument(skip(self), fields(user_id = %identity.user_id, chat_id = %identity.chat_id))]
    pub async fn is_authorized(&self, identity: &Identity) -> bool {
        if self.allow_list.contains(&identity.user_id) {
            debug!("user is allow-listed");
            return true;
        }

        if !identity.chat_kind.is_group() {
            debug!(chat_kind = ?identity.chat_kind, "no roster to consult outside group chats");
            return false;
        }

        let lookup = self.roster.chat_administrators(identity.chat_id);
        match tokio::time::timeout(self.lookup_timeout, lookup).await {
            Ok(Ok(admins)) => admins.contains(&identity.user_id),
            Ok(Err(e)) => {
                warn!(error = %e, "admin roster lookup failed; denying");
                false
            }
            Err(_) => {
                warn!(
                    timeout_ms = u64::try_from(self.lookup_timeout.as_millis()).unwrap_or(u64::MAX),
                    "admin roster lookup timed out; denying"
                );
                false
            }
        }
    }
}
