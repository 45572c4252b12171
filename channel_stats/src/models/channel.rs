//! Canonical in-memory representation of a resolved channel.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::records::{ChannelRecord, count_or_zero};

/// One preview image of a channel or video.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Thumbnails keyed by size name (`default`, `medium`, `high`, ...), in wire order.
pub type Thumbnails = IndexMap<String, Thumbnail>;

/// Identity and statistics snapshot of a channel.
///
/// Built fresh on every resolution and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// Stable platform identifier (e.g. `UC_x5XG1OV2P6uZZ5FSM9Ttw`).
    pub id: String,
    pub title: String,
    pub description: String,
    /// Handle-style URL fragment, e.g. `@google`.
    pub custom_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub thumbnails: Thumbnails,

    /// Current subscriber count. `0` when the channel hides it.
    pub subscriber_count: u64,
    pub view_count: u64,
    pub video_count: u64,
    /// Whether the platform reported the subscriber count as hidden.
    pub hidden_subscriber_count: bool,
}

impl Channel {
    /// Average lifetime views per upload; channels without uploads divide by one.
    pub fn average_views_per_video(&self) -> u64 {
        self.view_count / self.video_count.max(1)
    }

    /// Public URL of the channel page.
    pub fn url(&self) -> String {
        match self.custom_url.as_deref() {
            Some(handle) if !handle.is_empty() => {
                let handle = handle.trim_start_matches('@');
                format!("https://youtube.com/@{handle}")
            }
            _ => format!("https://youtube.com/channel/{}", self.id),
        }
    }
}

impl From<ChannelRecord> for Channel {
    fn from(rec: ChannelRecord) -> Self {
        let stats = &rec.statistics;
        let subscriber_count = count_or_zero(stats.subscriber_count.as_ref());
        let view_count = count_or_zero(stats.view_count.as_ref());
        let video_count = count_or_zero(stats.video_count.as_ref());
        let hidden_subscriber_count = stats.hidden_subscriber_count;

        Channel {
            id: rec.id,
            title: rec.snippet.title,
            description: rec.snippet.description,
            custom_url: rec.snippet.custom_url.filter(|u| !u.is_empty()),
            published_at: rec.snippet.published_at,
            thumbnails: rec.snippet.thumbnails,
            subscriber_count,
            view_count,
            video_count,
            hidden_subscriber_count,
        }
    }
}
