//! The aggregate handed to every presentation layer.

use serde::{Deserialize, Serialize};

use crate::models::{channel::Channel, history::SyntheticHistory, video::Video};

/// Channel snapshot, recent uploads and synthetic history of one request.
///
/// Owned by the caller that requested it; nothing is shared between requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsBundle {
    pub channel: Channel,
    pub videos: Vec<Video>,
    pub history: SyntheticHistory,
}
