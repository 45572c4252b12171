//! YouTube channel statistics: channel resolution, recent uploads and a
//! synthetic monthly history, with terminal, chart, CSV and web outputs.

pub mod aggregator;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod fetcher;
pub mod io;
pub mod models;
pub mod providers;
pub mod report;
pub mod resolver;
pub mod synthesizer;

pub use aggregator::{AggregatorSettings, StatsAggregator};
pub use errors::{Error, ErrorKind, StatsError};
pub use models::bundle::StatsBundle;
pub use providers::PlatformTransport;
pub use providers::youtube_rest::YouTubeRestProvider;
