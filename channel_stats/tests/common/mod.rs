#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use channel_stats::models::records::{
    ChannelContentDetails, ChannelRecord, ChannelSnippet, RawStatistics, RelatedPlaylists,
    SearchHit, VideoContentDetails, VideoRecord, VideoSnippet,
};
use channel_stats::providers::{PlatformTransport, TransportError};
use chrono::{TimeZone, Utc};

/// Which transport operation a call or a scripted failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    ById,
    ByUsername,
    Search,
    Uploads,
    Items,
    Details,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ById(String),
    ByUsername(String),
    Search(String, u32),
    Uploads(String),
    Items(String, u32),
    Details(Vec<String>),
}

impl Call {
    pub fn op(&self) -> Op {
        match self {
            Call::ById(_) => Op::ById,
            Call::ByUsername(_) => Op::ByUsername,
            Call::Search(..) => Op::Search,
            Call::Uploads(_) => Op::Uploads,
            Call::Items(..) => Op::Items,
            Call::Details(_) => Op::Details,
        }
    }
}

/// In-memory platform that records every call it receives.
#[derive(Default)]
pub struct FakeTransport {
    by_id: HashMap<String, ChannelRecord>,
    by_username: HashMap<String, ChannelRecord>,
    search_hits: Vec<SearchHit>,
    /// channel id -> uploads collection id
    uploads: HashMap<String, String>,
    /// collection id -> video ids, newest first
    items: HashMap<String, Vec<String>>,
    videos: HashMap<String, VideoRecord>,
    failures: HashMap<Op, (u16, Option<String>)>,
    calls: Mutex<Vec<Call>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channel(mut self, record: ChannelRecord) -> Self {
        self.by_id.insert(record.id.clone(), record);
        self
    }

    /// Registers `record` under a lookup key other than its id (e.g. a handle).
    pub fn with_alias(mut self, key: &str, record: ChannelRecord) -> Self {
        self.by_id.insert(key.to_string(), record);
        self
    }

    pub fn with_username(mut self, name: &str, record: ChannelRecord) -> Self {
        self.by_username.insert(name.to_string(), record);
        self
    }

    pub fn with_search_hit(mut self, channel_id: &str) -> Self {
        self.search_hits.push(SearchHit {
            channel_id: channel_id.to_string(),
            title: String::new(),
        });
        self
    }

    /// Gives `channel_id` an uploads collection containing `videos` (newest first).
    pub fn with_uploads(mut self, channel_id: &str, videos: Vec<VideoRecord>) -> Self {
        let collection = uploads_id(channel_id);
        self.uploads.insert(channel_id.to_string(), collection.clone());
        self.items
            .insert(collection, videos.iter().map(|v| v.id.clone()).collect());
        for v in videos {
            self.videos.insert(v.id.clone(), v);
        }
        self
    }

    /// Gives `channel_id` an uploads collection the platform answers 404 for.
    pub fn with_missing_collection(mut self, channel_id: &str) -> Self {
        self.uploads
            .insert(channel_id.to_string(), uploads_id(channel_id));
        self
    }

    pub fn failing(mut self, op: Op, status: u16, reason: Option<&str>) -> Self {
        self.failures.insert(op, (status, reason.map(str::to_string)));
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn ops(&self) -> Vec<Op> {
        self.calls().iter().map(Call::op).collect()
    }

    pub fn count(&self, op: Op) -> usize {
        self.ops().into_iter().filter(|o| *o == op).count()
    }

    fn record(&self, call: Call) -> Result<(), TransportError> {
        let op = call.op();
        self.calls.lock().unwrap().push(call);
        match self.failures.get(&op) {
            Some((status, reason)) => Err(TransportError::http(
                *status,
                reason.clone(),
                format!("scripted failure for {op:?}"),
            )),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PlatformTransport for FakeTransport {
    async fn lookup_by_id(&self, id: &str) -> Result<Option<ChannelRecord>, TransportError> {
        self.record(Call::ById(id.to_string()))?;
        Ok(self.by_id.get(id).cloned())
    }

    async fn lookup_by_username(&self, name: &str) -> Result<Option<ChannelRecord>, TransportError> {
        self.record(Call::ByUsername(name.to_string()))?;
        Ok(self.by_username.get(name).cloned())
    }

    async fn search_channels(&self, query: &str, limit: u32) -> Result<Vec<SearchHit>, TransportError> {
        self.record(Call::Search(query.to_string(), limit))?;
        Ok(self.search_hits.iter().take(limit as usize).cloned().collect())
    }

    async fn uploads_collection_id(&self, channel_id: &str) -> Result<Option<String>, TransportError> {
        self.record(Call::Uploads(channel_id.to_string()))?;
        Ok(self.uploads.get(channel_id).cloned())
    }

    async fn list_collection_items(&self, collection_id: &str, limit: u32) -> Result<Vec<String>, TransportError> {
        self.record(Call::Items(collection_id.to_string(), limit))?;
        match self.items.get(collection_id) {
            Some(ids) => Ok(ids.iter().take(limit as usize).cloned().collect()),
            None => Err(TransportError::http(404, Some("playlistNotFound".into()), "playlist not found")),
        }
    }

    async fn video_details(&self, ids: &[String]) -> Result<Vec<VideoRecord>, TransportError> {
        assert!(ids.len() <= 50, "detail batch of {} ids exceeds the platform limit", ids.len());
        self.record(Call::Details(ids.to_vec()))?;
        Ok(ids.iter().filter_map(|id| self.videos.get(id).cloned()).collect())
    }
}

pub fn uploads_id(channel_id: &str) -> String {
    format!("UU{}", channel_id.trim_start_matches("UC"))
}

pub fn channel_record(id: &str, title: &str, subscribers: u64, views: u64, videos: u64) -> ChannelRecord {
    ChannelRecord {
        id: id.to_string(),
        snippet: ChannelSnippet {
            title: title.to_string(),
            description: format!("{title} makes videos."),
            custom_url: Some(format!("@{}", title.to_lowercase().replace(' ', ""))),
            published_at: Utc.with_ymd_and_hms(2012, 5, 14, 9, 30, 0).unwrap(),
            ..Default::default()
        },
        statistics: RawStatistics {
            subscriber_count: Some(subscribers.into()),
            view_count: Some(views.into()),
            video_count: Some(videos.into()),
            ..Default::default()
        },
        content_details: Some(ChannelContentDetails {
            related_playlists: RelatedPlaylists {
                uploads: Some(uploads_id(id)),
            },
        }),
    }
}

pub fn video_record(id: &str, views: u64) -> VideoRecord {
    VideoRecord {
        id: id.to_string(),
        snippet: VideoSnippet {
            title: format!("Video {id}"),
            published_at: Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap(),
            ..Default::default()
        },
        statistics: RawStatistics {
            view_count: Some(views.into()),
            like_count: Some((views / 10).into()),
            comment_count: Some((views / 100).into()),
            ..Default::default()
        },
        content_details: VideoContentDetails {
            duration: "PT4M13S".into(),
        },
    }
}

pub fn videos(prefix: &str, n: usize) -> Vec<VideoRecord> {
    (0..n)
        .map(|i| video_record(&format!("{prefix}{i:03}"), 1_000 + i as u64))
        .collect()
}
