//! Composition of resolution, upload retrieval and history synthesis.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, instrument};

use crate::errors::StatsError;
use crate::fetcher::{DEFAULT_VIDEO_LIMIT, VideoFetcher};
use crate::models::bundle::StatsBundle;
use crate::providers::PlatformTransport;
use crate::resolver::ChannelResolver;
use crate::synthesizer::{CurrentTotals, HISTORICAL_MONTHS, VariationSource, synthesize};

/// Knobs of the aggregation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorSettings {
    /// Number of synthetic monthly points per metric.
    pub months: u32,
    /// Maximum number of recent uploads in a bundle.
    pub video_limit: u32,
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        Self {
            months: HISTORICAL_MONTHS,
            video_limit: DEFAULT_VIDEO_LIMIT,
        }
    }
}

/// Builds [`StatsBundle`]s. Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct StatsAggregator {
    transport: Arc<dyn PlatformTransport>,
    settings: AggregatorSettings,
}

impl StatsAggregator {
    pub fn new(transport: Arc<dyn PlatformTransport>) -> Self {
        Self::with_settings(transport, AggregatorSettings::default())
    }

    pub fn with_settings(transport: Arc<dyn PlatformTransport>, settings: AggregatorSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    /// Resolves `identifier`, fetches its recent uploads and attaches a
    /// synthetic history ending today (UTC).
    ///
    /// All-or-nothing: the first failure is returned unchanged and no partial
    /// bundle is produced.
    pub async fn get_comprehensive_stats(
        &self,
        identifier: &str,
        variation: &mut dyn VariationSource,
    ) -> Result<StatsBundle, StatsError> {
        self.get_comprehensive_stats_on(identifier, Utc::now().date_naive(), variation)
            .await
    }

    /// Same as [`get_comprehensive_stats`](Self::get_comprehensive_stats) with an explicit "today".
    #[instrument(skip(self, variation), fields(months = self.settings.months))]
    pub async fn get_comprehensive_stats_on(
        &self,
        identifier: &str,
        today: NaiveDate,
        variation: &mut dyn VariationSource,
    ) -> Result<StatsBundle, StatsError> {
        let transport = self.transport.as_ref();

        let channel = ChannelResolver::new(transport).resolve(identifier).await?;
        let videos = VideoFetcher::new(transport)
            .fetch_recent(&channel.id, self.settings.video_limit)
            .await?;
        let history = synthesize(
            CurrentTotals::from(&channel),
            self.settings.months,
            today,
            variation,
        );

        info!(
            channel_id = %channel.id,
            videos = videos.len(),
            points = history.subscribers.len(),
            "stats bundle assembled"
        );

        Ok(StatsBundle {
            channel,
            videos,
            history,
        })
    }
}
