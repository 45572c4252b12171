//! Transport abstraction for the video platform's statistics API.
//!
//! This module defines the [`PlatformTransport`] trait, the six raw calls the
//! resolver and fetcher are built on. The production implementation is
//! [`youtube_rest::YouTubeRestProvider`]; tests implement the trait with
//! in-memory fakes.
//!
//! The trait is designed for async usage and supports dynamic dispatch
//! (`Arc<dyn PlatformTransport>`), so callers receive the client explicitly
//! instead of reaching for a process-wide instance.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use channel_stats::models::records::{ChannelRecord, SearchHit, VideoRecord};
//! use channel_stats::providers::{PlatformTransport, TransportError};
//!
//! struct NothingThere;
//!
//! #[async_trait]
//! impl PlatformTransport for NothingThere {
//!     async fn lookup_by_id(&self, _id: &str) -> Result<Option<ChannelRecord>, TransportError> {
//!         Ok(None)
//!     }
//!     async fn lookup_by_username(&self, _name: &str) -> Result<Option<ChannelRecord>, TransportError> {
//!         Ok(None)
//!     }
//!     async fn search_channels(&self, _q: &str, _limit: u32) -> Result<Vec<SearchHit>, TransportError> {
//!         Ok(vec![])
//!     }
//!     async fn uploads_collection_id(&self, _channel_id: &str) -> Result<Option<String>, TransportError> {
//!         Ok(None)
//!     }
//!     async fn list_collection_items(&self, _id: &str, _limit: u32) -> Result<Vec<String>, TransportError> {
//!         Ok(vec![])
//!     }
//!     async fn video_details(&self, _ids: &[String]) -> Result<Vec<VideoRecord>, TransportError> {
//!         Ok(vec![])
//!     }
//! }
//! ```

pub mod youtube_rest;

use async_trait::async_trait;
use shared_utils::env::EnvError;
use snafu::{Backtrace, Snafu};

use crate::errors::ErrorKind;
use crate::models::records::{ChannelRecord, SearchHit, VideoRecord};

/// Most ids accepted by one [`PlatformTransport::video_details`] call, and the
/// platform's page-size cap.
pub const MAX_BATCH_SIZE: u32 = 50;

/// Raw platform calls consumed by the resolver and the fetcher.
///
/// "Nothing matched" is reported as `Ok(None)` / an empty `Vec`, never as an
/// error. Errors are reserved for failed calls and carry an HTTP-like status
/// when the platform answered.
#[async_trait]
pub trait PlatformTransport: Send + Sync {
    /// Looks up a channel by its platform id.
    async fn lookup_by_id(&self, id: &str) -> Result<Option<ChannelRecord>, TransportError>;

    /// Looks up a channel by its legacy username.
    async fn lookup_by_username(&self, name: &str)
    -> Result<Option<ChannelRecord>, TransportError>;

    /// Free-text channel search, best match first.
    async fn search_channels(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<SearchHit>, TransportError>;

    /// Id of the channel's uploads collection, `None` if the channel is unknown
    /// or exposes no uploads collection.
    async fn uploads_collection_id(
        &self,
        channel_id: &str,
    ) -> Result<Option<String>, TransportError>;

    /// Video ids of a collection in collection order, at most `limit` of them.
    async fn list_collection_items(
        &self,
        collection_id: &str,
        limit: u32,
    ) -> Result<Vec<String>, TransportError>;

    /// Full records for the given ids in one call. Callers pass at most
    /// [`MAX_BATCH_SIZE`] ids.
    async fn video_details(&self, ids: &[String]) -> Result<Vec<VideoRecord>, TransportError>;
}

/// Errors that can occur during the creation of a provider instance
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// The credential variable is missing or blank.
    #[snafu(display("Missing API credential: {source}"))]
    MissingEnvVar {
        source: EnvError,
        backtrace: Backtrace,
    },

    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// API key contains invalid characters.
    #[snafu(display("Invalid API key format: {source}"))]
    InvalidApiKey {
        source: reqwest::header::InvalidHeaderValue,
        backtrace: Backtrace,
    },

    /// The configured base URL cannot be parsed.
    #[snafu(display("Invalid API base URL '{url}': {source}"))]
    InvalidBaseUrl {
        url: String,
        source: reqwest::Error,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a [`PlatformTransport`] call.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum TransportError {
    /// The platform answered with a non-success status.
    #[snafu(display("API error (HTTP {status}): {message}"))]
    Http {
        status: u16,
        /// Machine-readable reason from the error body, e.g. `quotaExceeded`.
        reason: Option<String>,
        message: String,
    },

    /// An error during an API request (e.g., network failure, timeout).
    #[snafu(display("API request failed: {source}"))]
    Request {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The response body did not have the expected shape.
    #[snafu(display("Malformed API response: {message}"))]
    Decode { message: String },
}

impl TransportError {
    /// Shorthand for an [`TransportError::Http`] failure.
    pub fn http(status: u16, reason: Option<String>, message: impl Into<String>) -> Self {
        TransportError::Http {
            status,
            reason,
            message: message.into(),
        }
    }

    /// The HTTP status, when the platform answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Http { status, .. } => Some(*status),
            TransportError::Request { source, .. } => source.status().map(|s| s.as_u16()),
            TransportError::Decode { .. } => None,
        }
    }

    /// Classifies the failure: 401/403 and rejected keys are `Auth`, 404 is
    /// `NotFound`, everything else (including timeouts) is `Transient`.
    pub fn kind(&self) -> ErrorKind {
        if let TransportError::Http {
            reason: Some(reason),
            ..
        } = self
        {
            if is_credential_reason(reason) {
                return ErrorKind::Auth;
            }
        }
        match self.status() {
            Some(status) => ErrorKind::from_status(status),
            None => ErrorKind::Transient,
        }
    }
}

/// Error reasons the platform attaches to rejected or exhausted credentials,
/// some of which arrive with status 400 rather than 403.
fn is_credential_reason(reason: &str) -> bool {
    matches!(
        reason,
        "keyInvalid"
            | "keyExpired"
            | "quotaExceeded"
            | "dailyLimitExceeded"
            | "accessNotConfigured"
            | "forbidden"
            | "API_KEY_INVALID"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_key_with_400_is_auth() {
        let err = TransportError::http(400, Some("keyInvalid".into()), "API key not valid");
        assert_eq!(err.kind(), ErrorKind::Auth);
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn plain_400_is_transient() {
        let err = TransportError::http(400, Some("invalidParameter".into()), "bad");
        assert_eq!(err.kind(), ErrorKind::Transient);
    }

    #[test]
    fn decode_failures_are_transient() {
        let err = TransportError::Decode {
            message: "missing items".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Transient);
        assert_eq!(err.status(), None);
    }
}
