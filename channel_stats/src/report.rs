//! Terminal rendering of a [`StatsBundle`] and user-facing error guidance.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::errors::ErrorKind;
use crate::models::bundle::StatsBundle;
use crate::models::channel::Channel;
use crate::models::history::{Metric, SyntheticHistory};
use crate::models::video::Video;

/// Longest description shown in the channel block, in characters.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 200;
const RULE_WIDTH: usize = 60;

/// Compact count: `1.2M`, `45.3K`, or the plain number below one thousand.
pub fn format_number(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Full count with `,` thousands separators.
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `dd.mm.yyyy`
pub fn format_date(ts: &DateTime<Utc>) -> String {
    ts.format("%d.%m.%Y").to_string()
}

/// Cuts `text` to `max_chars` characters, appending `...` when something was cut.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// What the user should do about a failure of the given kind.
pub fn guidance(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::NotFound => {
            "Check the channel ID, @handle or name and try again."
        }
        ErrorKind::Auth => {
            "Check that the API key is valid, the YouTube Data API v3 is enabled for it, and the daily quota is not exhausted."
        }
        ErrorKind::Transient => "The platform did not respond as expected. Try again in a moment.",
    }
}

pub fn render_channel(channel: &Channel) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "CHANNEL: {}", channel.title);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "URL:          {}", channel.url());
    let _ = writeln!(out, "Created:      {}", format_date(&channel.published_at));
    let subscribers = if channel.hidden_subscriber_count {
        "hidden".to_string()
    } else {
        format_number(channel.subscriber_count)
    };
    let _ = writeln!(out, "Subscribers:  {subscribers:>10}");
    let _ = writeln!(out, "Views:        {:>10}", format_number(channel.view_count));
    let _ = writeln!(out, "Videos:       {:>10}", format_number(channel.video_count));
    let _ = writeln!(
        out,
        "Avg views/video: {:>7}",
        format_number(channel.average_views_per_video())
    );

    let description = channel.description.trim();
    if !description.is_empty() {
        let _ = writeln!(out, "\nDescription:");
        let _ = writeln!(out, "   {}", truncate(description, DESCRIPTION_PREVIEW_CHARS));
    }
    let _ = writeln!(out, "{rule}");
    out
}

/// The first `limit` videos, newest first as fetched.
pub fn render_videos(videos: &[Video], limit: usize) -> String {
    let mut out = String::new();
    if videos.is_empty() || limit == 0 {
        let _ = writeln!(out, "No videos found.");
        return out;
    }

    let shown = videos.len().min(limit);
    let _ = writeln!(out, "LATEST {shown} VIDEOS:");
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    for (i, video) in videos.iter().take(shown).enumerate() {
        let _ = writeln!(out, "\n{}. {}", i + 1, video.title);
        let _ = writeln!(out, "   Published: {}", format_date(&video.published_at));
        let _ = writeln!(out, "   {} views", format_number(video.view_count));
        let _ = writeln!(out, "   {} likes", format_number(video.like_count));
        let _ = writeln!(out, "   {} comments", format_number(video.comment_count));
    }
    out
}

pub fn render_history_summary(history: &SyntheticHistory) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Synthetic history (not real data):");
    for metric in Metric::ALL {
        let _ = writeln!(
            out,
            "   {} data points for {}",
            history.series(metric).len(),
            metric
        );
    }
    out
}

/// Full terminal report. `video_limit` of `None` omits the video block.
pub fn render_report(bundle: &StatsBundle, video_limit: Option<usize>) -> String {
    let mut out = render_channel(&bundle.channel);
    if let Some(limit) = video_limit {
        out.push('\n');
        out.push_str(&render_videos(&bundle.videos, limit));
    }
    out.push('\n');
    out.push_str(&render_history_summary(&bundle.history));
    out
}
