use std::path::{Path, PathBuf};

use async_trait::async_trait;
use snafu::{Backtrace, ResultExt, Snafu};

use crate::models::bundle::StatsBundle;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// An error occurred while trying to write an output file.
    #[snafu(display("Failed to write {}: {source}", path.display()))]
    Write {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// Drawing a chart failed.
    #[snafu(display("Chart rendering failed: {message}"))]
    Render { message: String },

    /// An error occurred while converting the bundle into a data frame or CSV.
    #[snafu(display("Data conversion error: {source}"))]
    Conversion {
        source: polars::error::PolarsError,
        backtrace: Backtrace,
    },

    /// There is nothing to export (e.g. a history of zero months).
    #[snafu(display("Nothing to export: {message}"))]
    Empty { message: String },
}

#[async_trait]
pub trait DataSink {
    /// The type of output returned after a successful write operation.
    ///
    /// A file sink returns the paths it created; an in-memory sink may return
    /// the rendered documents.
    type Output;

    /// Writes one bundle to the destination.
    async fn write(&self, bundle: &StatsBundle) -> Result<Self::Output, SinkError>;
}

/// Turns a channel title into a file-name stem: anything but letters, digits,
/// `-` and `_` becomes `_`.
pub fn file_stem(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    let stem = stem.trim_matches('_');
    if stem.is_empty() {
        "channel".to_string()
    } else {
        stem.to_string()
    }
}

/// Creates `dir` if needed and writes `contents` to `dir/name`.
pub(crate) async fn write_file(dir: &Path, name: &str, contents: &[u8]) -> Result<PathBuf, SinkError> {
    tokio::fs::create_dir_all(dir)
        .await
        .context(WriteSnafu { path: dir.to_path_buf() })?;
    let path = dir.join(name);
    tokio::fs::write(&path, contents)
        .await
        .context(WriteSnafu { path: path.clone() })?;
    Ok(path)
}
