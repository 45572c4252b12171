//! Synthetic monthly history series.
//!
//! Every value in these types is generated, not retrieved: the platform
//! exposes no historical counters, so the series are a placeholder derived
//! from current totals. Serialized output carries `"synthetic": true`.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The three counters a history is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Subscribers,
    Views,
    Videos,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Subscribers, Metric::Views, Metric::Videos];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Subscribers => "subscribers",
            Metric::Views => "views",
            Metric::Videos => "videos",
        }
    }

    /// Human-readable axis label.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Subscribers => "Subscribers",
            Metric::Views => "Views",
            Metric::Videos => "Videos",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One synthetic sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub value: u64,
}

/// Ordered, oldest-first samples for one metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySeries {
    pub metric: Metric,
    pub points: Vec<HistoryPoint>,
}

impl HistorySeries {
    pub fn new(metric: Metric) -> Self {
        Self {
            metric,
            points: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> Vec<u64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }
}

/// The three generated series of one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntheticHistory {
    /// Always `true`; marks the data as generated in every export.
    pub synthetic: bool,
    pub subscribers: HistorySeries,
    pub views: HistorySeries,
    pub videos: HistorySeries,
}

impl SyntheticHistory {
    pub fn empty() -> Self {
        Self {
            synthetic: true,
            subscribers: HistorySeries::new(Metric::Subscribers),
            views: HistorySeries::new(Metric::Views),
            videos: HistorySeries::new(Metric::Videos),
        }
    }

    pub fn series(&self, metric: Metric) -> &HistorySeries {
        match metric {
            Metric::Subscribers => &self.subscribers,
            Metric::Views => &self.views,
            Metric::Videos => &self.videos,
        }
    }

    pub(crate) fn series_mut(&mut self, metric: Metric) -> &mut HistorySeries {
        match metric {
            Metric::Subscribers => &mut self.subscribers,
            Metric::Views => &mut self.views,
            Metric::Videos => &mut self.videos,
        }
    }

    /// Rows of `(date, subscribers, views, videos)`, aligned by index.
    pub fn rows(&self) -> Vec<(NaiveDate, u64, u64, u64)> {
        self.subscribers
            .points
            .iter()
            .zip(&self.views.points)
            .zip(&self.videos.points)
            .map(|((s, v), n)| (s.date, s.value, v.value, n.value))
            .collect()
    }
}
