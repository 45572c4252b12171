//! A single upload's metadata and statistics snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::channel::Thumbnails;
use crate::models::records::{VideoRecord, count_or_zero};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: String,
    pub published_at: DateTime<Utc>,
    pub thumbnails: Thumbnails,
    /// ISO-8601 duration as reported by the platform, e.g. `PT4M13S`.
    pub duration: String,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
}

impl Video {
    /// Length of the upload in seconds, `None` if `duration` is not a supported ISO-8601 form.
    pub fn duration_seconds(&self) -> Option<u64> {
        parse_iso8601_duration(&self.duration)
    }

    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.id)
    }
}

impl From<VideoRecord> for Video {
    fn from(rec: VideoRecord) -> Self {
        let stats = &rec.statistics;
        let view_count = count_or_zero(stats.view_count.as_ref());
        let like_count = count_or_zero(stats.like_count.as_ref());
        let comment_count = count_or_zero(stats.comment_count.as_ref());

        Video {
            id: rec.id,
            title: rec.snippet.title,
            description: rec.snippet.description,
            published_at: rec.snippet.published_at,
            thumbnails: rec.snippet.thumbnails,
            duration: rec.content_details.duration,
            view_count,
            like_count,
            comment_count,
        }
    }
}

/// Parses the `P[nD]T[nH][nM][nS]` subset of ISO-8601 durations used by the platform.
///
/// Week, month and year designators are rejected; the platform never emits them
/// for uploads. Fractional seconds are truncated.
pub fn parse_iso8601_duration(raw: &str) -> Option<u64> {
    let rest = raw.trim().strip_prefix('P')?;
    if rest.is_empty() {
        return None;
    }

    let mut total: u64 = 0;
    let mut number = String::new();
    let mut in_time = false;
    let mut seen_component = false;

    for c in rest.chars() {
        match c {
            '0'..='9' | '.' => number.push(c),
            'T' if !in_time && number.is_empty() => in_time = true,
            'D' | 'H' | 'M' | 'S' => {
                if number.is_empty() {
                    return None;
                }
                let unit = match (c, in_time) {
                    ('D', false) => 86_400,
                    ('H', true) => 3_600,
                    ('M', true) => 60,
                    ('S', true) => 1,
                    _ => return None,
                };
                let whole = number.split('.').next().unwrap_or_default();
                let value: u64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
                total = total.checked_add(value.checked_mul(unit)?)?;
                number.clear();
                seen_component = true;
            }
            _ => return None,
        }
    }

    if !number.is_empty() || !seen_component {
        return None;
    }
    Some(total)
}
