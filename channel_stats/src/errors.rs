use snafu::Snafu;
use thiserror::Error;

use crate::io::sink::SinkError;
use crate::providers::{ProviderInitError, TransportError};

/// Coarse classification shared by transport failures and core failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The identifier or resource does not exist. User-correctable.
    NotFound,
    /// The credential was rejected or its quota is exhausted. Operator-correctable.
    Auth,
    /// Network or platform hiccup.
    Transient,
}

impl ErrorKind {
    /// Maps an HTTP-like status code to a kind.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => ErrorKind::Auth,
            404 => ErrorKind::NotFound,
            _ => ErrorKind::Transient,
        }
    }
}

/// Failures surfaced by the resolver, the fetcher and the aggregator.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum StatsError {
    /// No resolution tier produced a channel, or a resource is gone.
    #[snafu(display("Channel '{identifier}' not found. Please check the channel ID or username."))]
    NotFound { identifier: String },

    /// The platform rejected the API key or the quota is used up.
    #[snafu(display("API quota exceeded or invalid API key: {message}"))]
    Auth { message: String },

    /// Any other platform-side failure.
    #[snafu(display("Platform request failed: {message}"))]
    Transient { message: String },
}

impl StatsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StatsError::NotFound { .. } => ErrorKind::NotFound,
            StatsError::Auth { .. } => ErrorKind::Auth,
            StatsError::Transient { .. } => ErrorKind::Transient,
        }
    }

    /// Converts a transport failure, naming `subject` when the platform reports absence.
    pub(crate) fn from_transport(err: TransportError, subject: &str) -> Self {
        match err.kind() {
            ErrorKind::NotFound => StatsError::NotFound {
                identifier: subject.to_string(),
            },
            ErrorKind::Auth => StatsError::Auth {
                message: err.to_string(),
            },
            ErrorKind::Transient => StatsError::Transient {
                message: err.to_string(),
            },
        }
    }
}

/// The unified error type for the `channel_stats` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Channel resolution or upload retrieval failed.
    #[error(transparent)]
    Stats(#[from] StatsError),

    /// The platform client could not be constructed.
    #[error("Provider initialization failed: {0}")]
    ProviderInit(#[from] ProviderInitError),

    /// An error originating from a data sink (chart or CSV export).
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    /// An error related to configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
