use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use shared_utils::env::get_env_var;
use snafu::ResultExt;
use tracing::debug;

use crate::{
    models::records::{ChannelRecord, SearchHit, VideoRecord},
    providers::{
        ClientBuildSnafu, InvalidApiKeySnafu, InvalidBaseUrlSnafu, MissingEnvVarSnafu,
        PlatformTransport, ProviderInitError, RequestSnafu, TransportError,
        youtube_rest::{
            params::{ListParams, MAX_PAGE_SIZE},
            response::{ErrorResponse, ListResponse, PlaylistItem, SearchResult},
        },
    },
};

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_API_KEY_ENV: &str = "YOUTUBE_API_KEY";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const API_KEY_HEADER: &str = "X-Goog-Api-Key";

/// Connection settings of a [`YouTubeRestProvider`].
#[derive(Clone, Debug)]
pub struct RestSettings {
    /// API root without trailing slash, e.g. `https://www.googleapis.com/youtube/v3`.
    pub base_url: String,
    /// Per-call timeout. An expired call surfaces as a transient failure.
    pub timeout: Duration,
}

impl Default for RestSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// [`PlatformTransport`] over the YouTube Data API v3.
///
/// The key travels in the `X-Goog-Api-Key` header so it never shows up in
/// URLs, logs or error messages.
pub struct YouTubeRestProvider {
    client: Client,
    base_url: String,
}

impl YouTubeRestProvider {
    /// Creates a provider bound to one static API key.
    pub fn new(api_key: SecretString, settings: RestSettings) -> Result<Self, ProviderInitError> {
        let mut key_value = header::HeaderValue::from_str(api_key.expose_secret())
            .context(InvalidApiKeySnafu)?;
        key_value.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(API_KEY_HEADER, key_value);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context(ClientBuildSnafu)?;

        let base_url = settings.base_url.trim_end_matches('/').to_string();
        client
            .get(format!("{base_url}/channels"))
            .build()
            .context(InvalidBaseUrlSnafu {
                url: base_url.clone(),
            })?;

        Ok(Self { client, base_url })
    }

    /// Creates a provider reading the key from the `YOUTUBE_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, ProviderInitError> {
        Self::from_env_var(DEFAULT_API_KEY_ENV, RestSettings::default())
    }

    /// Creates a provider reading the key from the named environment variable.
    pub fn from_env_var(var: &str, settings: RestSettings) -> Result<Self, ProviderInitError> {
        let api_key = SecretString::from(get_env_var(var).context(MissingEnvVarSnafu)?);
        Self::new(api_key, settings)
    }

    async fn list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &ListParams,
    ) -> Result<ListResponse<T>, TransportError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(endpoint, part = %params.part, "platform request");

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .context(RequestSnafu)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_body(status.as_u16(), &body));
        }

        let bytes = response.bytes().await.context(RequestSnafu)?;
        serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode {
            message: format!("{endpoint}: {e}"),
        })
    }

    async fn first_channel(
        &self,
        params: &ListParams,
    ) -> Result<Option<ChannelRecord>, TransportError> {
        let page: ListResponse<ChannelRecord> = self.list("channels", params).await?;
        Ok(page.items.into_iter().next())
    }
}

/// Builds a transport error from a non-success response body.
fn error_from_body(status: u16, body: &str) -> TransportError {
    let parsed: ErrorResponse = serde_json::from_str(body).unwrap_or_default();
    let reason = parsed.reason();
    let message = if parsed.error.message.is_empty() {
        if body.trim().is_empty() {
            "Unknown API error".to_string()
        } else {
            body.trim().chars().take(200).collect()
        }
    } else {
        parsed.error.message
    };
    TransportError::Http {
        status,
        reason,
        message,
    }
}

#[async_trait]
impl PlatformTransport for YouTubeRestProvider {
    async fn lookup_by_id(&self, id: &str) -> Result<Option<ChannelRecord>, TransportError> {
        self.first_channel(&ListParams::channel_by_id(id)).await
    }

    async fn lookup_by_username(
        &self,
        name: &str,
    ) -> Result<Option<ChannelRecord>, TransportError> {
        self.first_channel(&ListParams::channel_by_username(name))
            .await
    }

    async fn search_channels(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<SearchHit>, TransportError> {
        let page: ListResponse<SearchResult> = self
            .list("search", &ListParams::channel_search(query, limit))
            .await?;
        Ok(page
            .items
            .into_iter()
            .filter_map(SearchResult::into_hit)
            .take(limit as usize)
            .collect())
    }

    async fn uploads_collection_id(
        &self,
        channel_id: &str,
    ) -> Result<Option<String>, TransportError> {
        let record = self
            .first_channel(&ListParams::channel_uploads(channel_id))
            .await?;
        Ok(record.and_then(|r| r.uploads_playlist().map(str::to_string)))
    }

    async fn list_collection_items(
        &self,
        collection_id: &str,
        limit: u32,
    ) -> Result<Vec<String>, TransportError> {
        let wanted = limit as usize;
        let mut ids: Vec<String> = Vec::with_capacity(wanted.min(MAX_PAGE_SIZE as usize));
        let mut next_page_token: Option<String> = None;

        while ids.len() < wanted {
            let remaining = (wanted - ids.len()) as u32;
            let params = ListParams::playlist_page(collection_id, remaining, next_page_token.take());
            let page: ListResponse<PlaylistItem> = self.list("playlistItems", &params).await?;

            ids.extend(
                page.items
                    .into_iter()
                    .filter_map(|item| item.content_details.video_id)
                    .filter(|id| !id.is_empty()),
            );

            // If there's a next page token, use it for the next iteration. Otherwise, we're done.
            match page.next_page_token {
                Some(token) if !token.is_empty() => next_page_token = Some(token),
                _ => break,
            }
        }

        ids.truncate(wanted);
        Ok(ids)
    }

    async fn video_details(&self, ids: &[String]) -> Result<Vec<VideoRecord>, TransportError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let page: ListResponse<VideoRecord> = self.list("videos", &ListParams::videos(ids)).await?;
        Ok(page.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_without_json_keeps_raw_text() {
        let err = error_from_body(502, "<html>Bad Gateway</html>");
        match err {
            TransportError::Http {
                status,
                reason,
                message,
            } => {
                assert_eq!(status, 502);
                assert!(reason.is_none());
                assert_eq!(message, "<html>Bad Gateway</html>");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn empty_error_body_gets_placeholder() {
        let err = error_from_body(500, "");
        assert!(err.to_string().contains("Unknown API error"));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let settings = RestSettings {
            base_url: "not a url".into(),
            ..Default::default()
        };
        let res = YouTubeRestProvider::new(SecretString::from("k".to_string()), settings);
        assert!(matches!(res, Err(ProviderInitError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn key_with_newline_is_rejected() {
        let res = YouTubeRestProvider::new(
            SecretString::from("abc\ndef".to_string()),
            RestSettings::default(),
        );
        assert!(matches!(res, Err(ProviderInitError::InvalidApiKey { .. })));
    }
}
