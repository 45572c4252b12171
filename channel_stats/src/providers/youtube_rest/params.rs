use serde::Serialize;

use crate::providers::MAX_BATCH_SIZE;

/// The platform caps `maxResults` and the number of ids per `videos` call.
pub const MAX_PAGE_SIZE: u32 = MAX_BATCH_SIZE;

/// Resource parts requested for a full channel record.
pub const CHANNEL_PARTS: &[Part] = &[Part::Snippet, Part::Statistics];
/// Resource parts requested for a full video record.
pub const VIDEO_PARTS: &[Part] = &[Part::Snippet, Part::Statistics, Part::ContentDetails];

/// A resource part name for the `part` query parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Part {
    Snippet,
    Statistics,
    ContentDetails,
}

impl Part {
    pub fn as_str(&self) -> &'static str {
        match self {
            Part::Snippet => "snippet",
            Part::Statistics => "statistics",
            Part::ContentDetails => "contentDetails",
        }
    }
}

pub fn join_parts(parts: &[Part]) -> String {
    parts.iter().map(Part::as_str).collect::<Vec<_>>().join(",")
}

/// Restricts a search to one resource type.
#[derive(Clone, Debug, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    #[default]
    Channel,
    Video,
    Playlist,
}

/// Query parameters of a `list` call against any of the endpoints used here.
#[derive(Clone, Debug, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub part: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub for_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub search_type: Option<SearchType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

impl ListParams {
    pub fn channel_by_id(id: &str) -> Self {
        Self {
            part: join_parts(CHANNEL_PARTS),
            id: Some(id.to_string()),
            ..Default::default()
        }
    }

    pub fn channel_by_username(name: &str) -> Self {
        Self {
            part: join_parts(CHANNEL_PARTS),
            for_username: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn channel_uploads(channel_id: &str) -> Self {
        Self {
            part: join_parts(&[Part::ContentDetails]),
            id: Some(channel_id.to_string()),
            ..Default::default()
        }
    }

    pub fn channel_search(query: &str, limit: u32) -> Self {
        Self {
            part: join_parts(&[Part::Snippet]),
            q: Some(query.to_string()),
            search_type: Some(SearchType::Channel),
            max_results: Some(limit.clamp(1, MAX_PAGE_SIZE)),
            ..Default::default()
        }
    }

    pub fn playlist_page(playlist_id: &str, page_size: u32, page_token: Option<String>) -> Self {
        Self {
            part: join_parts(&[Part::Snippet, Part::ContentDetails]),
            playlist_id: Some(playlist_id.to_string()),
            max_results: Some(page_size.clamp(1, MAX_PAGE_SIZE)),
            page_token,
            ..Default::default()
        }
    }

    pub fn videos(ids: &[String]) -> Self {
        Self {
            part: join_parts(VIDEO_PARTS),
            id: Some(ids.join(",")),
            ..Default::default()
        }
    }
}
