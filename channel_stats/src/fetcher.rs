//! Recent-upload retrieval for a resolved channel.

use tracing::{debug, info};

use crate::errors::{ErrorKind, StatsError};
use crate::models::video::Video;
use crate::providers::{MAX_BATCH_SIZE, PlatformTransport};

/// Default number of uploads fetched per channel.
pub const DEFAULT_VIDEO_LIMIT: u32 = 50;

/// Fetches a channel's newest uploads with batched detail lookups.
pub struct VideoFetcher<'a> {
    transport: &'a dyn PlatformTransport,
}

impl<'a> VideoFetcher<'a> {
    pub fn new(transport: &'a dyn PlatformTransport) -> Self {
        Self { transport }
    }

    /// Returns up to `limit` uploads of `channel_id` in collection order.
    ///
    /// Steps: resolve the uploads collection, list its item ids, then fetch
    /// details for all ids in as few calls as the platform allows (one per 50
    /// ids). An empty collection yields an empty vector.
    ///
    /// # Errors
    /// * [`StatsError::NotFound`] if the channel has no uploads collection.
    /// * [`StatsError::Auth`] / [`StatsError::Transient`] on platform failures.
    pub async fn fetch_recent(&self, channel_id: &str, limit: u32) -> Result<Vec<Video>, StatsError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let collection_id = self
            .transport
            .uploads_collection_id(channel_id)
            .await
            .map_err(|e| StatsError::from_transport(e, channel_id))?
            .ok_or_else(|| StatsError::NotFound {
                identifier: channel_id.to_string(),
            })?;
        debug!(channel_id, collection_id = %collection_id, "uploads collection resolved");

        // The platform answers 404 for the uploads collection of a channel that
        // never published anything.
        let ids = match self
            .transport
            .list_collection_items(&collection_id, limit)
            .await
        {
            Ok(ids) => ids,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(StatsError::from_transport(e, channel_id)),
        };

        if ids.is_empty() {
            info!(channel_id, "channel has no uploads");
            return Ok(Vec::new());
        }

        let mut videos = Vec::with_capacity(ids.len());
        for batch in ids.chunks(MAX_BATCH_SIZE as usize) {
            let records = self
                .transport
                .video_details(batch)
                .await
                .map_err(|e| StatsError::from_transport(e, channel_id))?;
            videos.extend(records.into_iter().map(Video::from));
        }

        info!(channel_id, count = videos.len(), "uploads fetched");
        Ok(videos)
    }
}
