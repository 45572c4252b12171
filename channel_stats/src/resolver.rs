//! Identifier → channel resolution.
//!
//! A user may hold a channel id, a legacy username, a handle (`@name`) or just
//! a display name, and these are indistinguishable by shape. [`ChannelResolver`]
//! tries three lookups in a fixed order and stops at the first hit:
//!
//! 1. the stripped identifier as a channel id,
//! 2. the same string as a legacy username,
//! 3. a free-text channel search, followed by a full lookup of the top hit.
//!
//! Each tier ends in one of three outcomes. A hit returns. Absence, including a
//! platform 404, moves on to the next tier. Any other failure (rejected
//! credential, quota, network) aborts the chain: later tiers would fail the
//! same way.

use std::fmt;

use tracing::{debug, info, warn};

use crate::errors::{ErrorKind, StatsError};
use crate::models::{channel::Channel, records::ChannelRecord};
use crate::providers::{PlatformTransport, TransportError};

/// Number of search results requested by the last tier; only the top one is used.
const SEARCH_LIMIT: u32 = 1;

/// The lookup strategies, in the order they are attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Id,
    Username,
    Search,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tier::Id => "id",
            Tier::Username => "username",
            Tier::Search => "search",
        })
    }
}

/// Strips surrounding whitespace and one leading `@`.
pub fn normalize_identifier(identifier: &str) -> &str {
    let trimmed = identifier.trim();
    trimmed.strip_prefix('@').unwrap_or(trimmed).trim()
}

/// Resolves user-supplied identifiers through a borrowed transport.
pub struct ChannelResolver<'a> {
    transport: &'a dyn PlatformTransport,
}

impl<'a> ChannelResolver<'a> {
    pub fn new(transport: &'a dyn PlatformTransport) -> Self {
        Self { transport }
    }

    /// Resolves `identifier` to a full channel record.
    ///
    /// # Errors
    /// * [`StatsError::NotFound`] with the original identifier when no tier matches.
    /// * [`StatsError::Auth`] / [`StatsError::Transient`] as soon as any tier fails
    ///   for a reason other than absence.
    pub async fn resolve(&self, identifier: &str) -> Result<Channel, StatsError> {
        let key = normalize_identifier(identifier);
        if key.is_empty() {
            return Err(StatsError::NotFound {
                identifier: identifier.to_string(),
            });
        }

        let by_id = self.transport.lookup_by_id(key).await;
        if let Some(record) = settle(Tier::Id, identifier, by_id)? {
            return Ok(found(Tier::Id, record));
        }

        let by_username = self.transport.lookup_by_username(key).await;
        if let Some(record) = settle(Tier::Username, identifier, by_username)? {
            return Ok(found(Tier::Username, record));
        }

        if let Some(record) = self.search_tier(identifier, key).await? {
            return Ok(found(Tier::Search, record));
        }

        info!(identifier, "no resolution tier matched");
        Err(StatsError::NotFound {
            identifier: identifier.to_string(),
        })
    }

    /// Search, then re-fetch the top hit by id so the caller gets statistics,
    /// not the search stub.
    async fn search_tier(
        &self,
        identifier: &str,
        key: &str,
    ) -> Result<Option<ChannelRecord>, StatsError> {
        let hits = self.transport.search_channels(key, SEARCH_LIMIT).await;
        let top = settle(Tier::Search, identifier, hits.map(|h| h.into_iter().next()))?;
        let Some(hit) = top else {
            return Ok(None);
        };

        debug!(identifier, channel_id = %hit.channel_id, "search hit, fetching details");
        let detail = self.transport.lookup_by_id(&hit.channel_id).await;
        settle(Tier::Search, identifier, detail)
    }
}

/// Folds one tier's transport result into found / absent / abort.
fn settle<T>(
    tier: Tier,
    identifier: &str,
    outcome: Result<Option<T>, TransportError>,
) -> Result<Option<T>, StatsError> {
    match outcome {
        Ok(Some(value)) => Ok(Some(value)),
        Ok(None) => {
            debug!(%tier, identifier, "tier found nothing");
            Ok(None)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(%tier, identifier, error = %err, "tier reported absence");
            Ok(None)
        }
        Err(err) => {
            warn!(%tier, identifier, error = %err, "tier failed, aborting resolution");
            Err(StatsError::from_transport(err, identifier))
        }
    }
}

fn found(tier: Tier, record: ChannelRecord) -> Channel {
    let channel = Channel::from(record);
    info!(%tier, channel_id = %channel.id, title = %channel.title, "channel resolved");
    channel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_normalized() {
        assert_eq!(normalize_identifier("@google"), "google");
        assert_eq!(normalize_identifier("  @google "), "google");
        assert_eq!(normalize_identifier("UC_x5XG1OV2P6uZZ5FSM9Ttw"), "UC_x5XG1OV2P6uZZ5FSM9Ttw");
        assert_eq!(normalize_identifier("@@double"), "@double");
        assert_eq!(normalize_identifier("@"), "");
        assert_eq!(normalize_identifier("Linus Tech Tips"), "Linus Tech Tips");
    }

    #[test]
    fn tier_names() {
        assert_eq!(Tier::Id.to_string(), "id");
        assert_eq!(Tier::Search.to_string(), "search");
    }
}
