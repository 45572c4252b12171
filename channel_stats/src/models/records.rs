//! Platform-shaped records exchanged with a [`PlatformTransport`](crate::providers::PlatformTransport).
//!
//! These mirror the resource layout of the YouTube Data API v3 (`channels`,
//! `videos`, `search`), so the HTTP provider can deserialize responses straight
//! into them and test fakes can build them by hand. Counters stay in their raw
//! wire form here; the resolver and fetcher normalize them into the domain
//! models in [`channel`](super::channel) and [`video`](super::video).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::channel::Thumbnails;

/// A statistics counter as sent on the wire.
///
/// The platform encodes counters as decimal strings; some proxies and mock
/// servers send plain numbers instead. Both are accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireCount {
    Number(u64),
    Text(String),
}

impl WireCount {
    /// The counter as a non-negative integer, `None` when the text is not a number.
    pub fn to_u64(&self) -> Option<u64> {
        match self {
            WireCount::Number(n) => Some(*n),
            WireCount::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<u64> for WireCount {
    fn from(n: u64) -> Self {
        WireCount::Text(n.to_string())
    }
}

/// Parses an optional counter, treating absent or malformed values as zero.
pub fn count_or_zero(raw: Option<&WireCount>) -> u64 {
    raw.and_then(WireCount::to_u64).unwrap_or(0)
}

/// The `statistics` part shared by channel and video resources.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStatistics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<WireCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriber_count: Option<WireCount>,
    #[serde(default)]
    pub hidden_subscriber_count: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_count: Option<WireCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub like_count: Option<WireCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<WireCount>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_url: Option<String>,
    #[serde(default)]
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedPlaylists {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploads: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelContentDetails {
    #[serde(default)]
    pub related_playlists: RelatedPlaylists,
}

/// A `channels` resource.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelRecord {
    pub id: String,
    #[serde(default)]
    pub snippet: ChannelSnippet,
    #[serde(default)]
    pub statistics: RawStatistics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_details: Option<ChannelContentDetails>,
}

impl ChannelRecord {
    /// The uploads playlist id, when the record carries `contentDetails`.
    pub fn uploads_playlist(&self) -> Option<&str> {
        self.content_details
            .as_ref()
            .and_then(|cd| cd.related_playlists.uploads.as_deref())
            .filter(|id| !id.is_empty())
    }
}

/// One free-text search result pointing at a channel.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub channel_id: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoContentDetails {
    #[serde(default)]
    pub duration: String,
}

/// A `videos` resource.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub id: String,
    #[serde(default)]
    pub snippet: VideoSnippet,
    #[serde(default)]
    pub statistics: RawStatistics,
    #[serde(default)]
    pub content_details: VideoContentDetails,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accept_strings_and_numbers() {
        let stats: RawStatistics = serde_json::from_str(
            r#"{"viewCount":"12345","subscriberCount":42,"videoCount":" 7 "}"#,
        )
        .unwrap();
        assert_eq!(count_or_zero(stats.view_count.as_ref()), 12345);
        assert_eq!(count_or_zero(stats.subscriber_count.as_ref()), 42);
        assert_eq!(count_or_zero(stats.video_count.as_ref()), 7);
        assert_eq!(count_or_zero(stats.like_count.as_ref()), 0);
    }

    #[test]
    fn garbage_counter_reads_as_zero() {
        let raw = WireCount::Text("n/a".into());
        assert_eq!(count_or_zero(Some(&raw)), 0);
    }

    #[test]
    fn channel_record_from_api_json() {
        let rec: ChannelRecord = serde_json::from_str(
            r#"{
                "kind": "youtube#channel",
                "id": "UC_x5XG1OV2P6uZZ5FSM9Ttw",
                "snippet": {
                    "title": "Google for Developers",
                    "description": "Subscribe",
                    "customUrl": "@googledevelopers",
                    "publishedAt": "2007-08-23T00:34:43Z",
                    "thumbnails": {"default": {"url": "https://yt3.example/d.jpg", "width": 88, "height": 88}}
                },
                "statistics": {"viewCount": "100", "hiddenSubscriberCount": true, "videoCount": "5"},
                "contentDetails": {"relatedPlaylists": {"likes": "", "uploads": "UU_x5XG1OV2P6uZZ5FSM9Ttw"}}
            }"#,
        )
        .unwrap();
        assert_eq!(rec.snippet.custom_url.as_deref(), Some("@googledevelopers"));
        assert!(rec.statistics.hidden_subscriber_count);
        assert!(rec.statistics.subscriber_count.is_none());
        assert_eq!(rec.uploads_playlist(), Some("UU_x5XG1OV2P6uZZ5FSM9Ttw"));
        assert_eq!(rec.snippet.thumbnails["default"].width, Some(88));
    }
}
