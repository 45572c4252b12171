//! Tabular exports of a stats bundle, built as polars data frames and
//! serialized to CSV.

use std::path::PathBuf;

use async_trait::async_trait;
use polars::prelude::*;
use snafu::ResultExt;
use tracing::info;

use crate::io::sink::{ConversionSnafu, DataSink, SinkError, file_stem, write_file};
use crate::models::bundle::StatsBundle;
use crate::models::channel::Channel;
use crate::models::history::SyntheticHistory;

/// Two-column `metric,value` table of the current totals.
pub fn summary_frame(channel: &Channel) -> PolarsResult<DataFrame> {
    df!(
        "metric" => &["subscribers", "views", "videos", "average_views_per_video"],
        "value" => &[
            channel.subscriber_count,
            channel.view_count,
            channel.video_count,
            channel.average_views_per_video(),
        ]
    )
}

/// One row per synthetic month: `date,subscribers,views,videos`.
pub fn history_frame(history: &SyntheticHistory) -> PolarsResult<DataFrame> {
    let rows = history.rows();
    let dates: Vec<String> = rows
        .iter()
        .map(|(d, ..)| d.format("%Y-%m-%d").to_string())
        .collect();
    let subscribers: Vec<u64> = rows.iter().map(|r| r.1).collect();
    let views: Vec<u64> = rows.iter().map(|r| r.2).collect();
    let videos: Vec<u64> = rows.iter().map(|r| r.3).collect();

    df!(
        "date" => dates,
        "subscribers" => subscribers,
        "views" => views,
        "videos" => videos
    )
}

/// Serializes a frame as CSV with a header row.
pub fn frame_to_csv(df: &mut DataFrame) -> PolarsResult<String> {
    let mut buf = Vec::new();
    CsvWriter::new(&mut buf).include_header(true).finish(df)?;
    String::from_utf8(buf).map_err(|e| PolarsError::ComputeError(e.to_string().into()))
}

/// Writes `{stem}_statistics.csv` and `{stem}_history.csv` into a directory.
pub struct CsvSink {
    output_dir: PathBuf,
}

impl CsvSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl DataSink for CsvSink {
    type Output = Vec<PathBuf>;

    async fn write(&self, bundle: &StatsBundle) -> Result<Vec<PathBuf>, SinkError> {
        let stem = file_stem(&bundle.channel.title);

        let summary = summary_frame(&bundle.channel)
            .and_then(|mut df| frame_to_csv(&mut df))
            .context(ConversionSnafu)?;
        let history = history_frame(&bundle.history)
            .and_then(|mut df| frame_to_csv(&mut df))
            .context(ConversionSnafu)?;

        let written = vec![
            write_file(&self.output_dir, &format!("{stem}_statistics.csv"), summary.as_bytes()).await?,
            write_file(&self.output_dir, &format!("{stem}_history.csv"), history.as_bytes()).await?,
        ];

        info!(dir = %self.output_dir.display(), "csv exports written");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesizer::{CurrentTotals, FixedVariation, synthesize};
    use chrono::NaiveDate;

    #[test]
    fn summary_includes_average() {
        let channel = Channel {
            subscriber_count: 10,
            view_count: 1000,
            video_count: 4,
            ..Default::default()
        };
        let mut df = summary_frame(&channel).unwrap();
        assert_eq!(df.shape(), (4, 2));
        let csv = frame_to_csv(&mut df).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "metric,value");
        assert_eq!(lines[4], "average_views_per_video,250");
    }

    #[test]
    fn history_rows_are_oldest_first() {
        let totals = CurrentTotals {
            subscribers: 1000,
            views: 10_000,
            videos: 10,
        };
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let history = synthesize(totals, 2, today, &mut FixedVariation(1.0));
        let mut df = history_frame(&history).unwrap();
        let csv = frame_to_csv(&mut df).unwrap();
        assert_eq!(
            csv.lines().collect::<Vec<_>>(),
            vec![
                "date,subscribers,views,videos",
                "2024-05-01,900,9000,9",
                "2024-05-31,950,9500,9",
            ]
        );
    }
}
