use serde::Deserialize;

use crate::models::records::SearchHit;

/// Envelope of every `list` endpoint.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    pub next_page_token: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultId {
    pub channel_id: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub channel_title: String,
}

#[derive(Deserialize, Debug)]
pub struct SearchResult {
    #[serde(default)]
    pub id: SearchResultId,
    #[serde(default)]
    pub snippet: SearchResultSnippet,
}

impl SearchResult {
    /// Converts to a hit; results without a channel id (other resource kinds) yield `None`.
    pub fn into_hit(self) -> Option<SearchHit> {
        let channel_id = self.id.channel_id.filter(|id| !id.is_empty())?;
        let title = if self.snippet.title.is_empty() {
            self.snippet.channel_title
        } else {
            self.snippet.title
        };
        Some(SearchHit { channel_id, title })
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemDetails {
    pub video_id: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItem {
    #[serde(default)]
    pub content_details: PlaylistItemDetails,
}

#[derive(Deserialize, Debug, Default)]
pub struct ErrorItem {
    #[serde(default)]
    pub reason: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct ErrorDetail {
    #[serde(default)]
    pub reason: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<ErrorItem>,
    #[serde(default)]
    pub details: Vec<ErrorDetail>,
}

/// Body of a non-success response.
#[derive(Deserialize, Debug, Default)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: ErrorBody,
}

impl ErrorResponse {
    /// The most specific reason in the body. `details` (e.g. `API_KEY_INVALID`)
    /// wins over the generic `errors[].reason` (e.g. `badRequest`).
    pub fn reason(&self) -> Option<String> {
        self.error
            .details
            .iter()
            .map(|d| d.reason.as_str())
            .chain(self.error.errors.iter().map(|e| e.reason.as_str()))
            .find(|r| !r.is_empty())
            .map(str::to_string)
    }
}
