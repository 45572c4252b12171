//! Application configuration loaded from an optional TOML file.
//!
//! Every field has a default, so an empty file (or no file at all) is a
//! valid configuration:
//!
//! ```toml
//! api_base_url = "https://www.googleapis.com/youtube/v3"
//! request_timeout_secs = 10
//! historical_months = 12
//! video_limit = 50
//! output_dir = "charts"
//! api_key_env = "YOUTUBE_API_KEY"
//!
//! [chart]
//! subscribers = "#FF0000"
//! views = "#00D4AA"
//! videos = "#FF6B35"
//! background = "#0F0F0F"
//! grid = "#272727"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::aggregator::AggregatorSettings;
use crate::errors::Error;
use crate::fetcher::DEFAULT_VIDEO_LIMIT;
use crate::io::chart::ChartPalette;
use crate::providers::youtube_rest::{DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, RestSettings};
use crate::synthesizer::{HISTORICAL_MONTHS, MAX_HISTORICAL_MONTHS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub historical_months: u32,
    pub video_limit: u32,
    pub output_dir: PathBuf,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub chart: ChartPalette,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 10,
            historical_months: HISTORICAL_MONTHS,
            video_limit: DEFAULT_VIDEO_LIMIT,
            output_dir: PathBuf::from("charts"),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            chart: ChartPalette::default(),
        }
    }
}

impl AppConfig {
    /// Rejects values the rest of the application cannot work with.
    pub fn validate(&self) -> Result<(), Error> {
        if self.api_base_url.trim().is_empty() {
            return Err(Error::Config("api_base_url must not be empty".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::Config("request_timeout_secs must be at least 1".into()));
        }
        if !(1..=MAX_HISTORICAL_MONTHS).contains(&self.historical_months) {
            return Err(Error::Config(format!(
                "historical_months must be between 1 and {MAX_HISTORICAL_MONTHS}"
            )));
        }
        if self.api_key_env.trim().is_empty() {
            return Err(Error::Config("api_key_env must not be empty".into()));
        }
        let bad = self.chart.invalid_fields();
        if !bad.is_empty() {
            return Err(Error::Config(format!(
                "chart colours must be #RRGGBB: {}",
                bad.join(", ")
            )));
        }
        Ok(())
    }

    pub fn rest_settings(&self) -> RestSettings {
        RestSettings {
            base_url: self.api_base_url.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn aggregator_settings(&self) -> AggregatorSettings {
        AggregatorSettings {
            months: self.historical_months,
            video_limit: self.video_limit,
        }
    }
}

/// Parses and validates a configuration document.
pub fn load_config_str(text: &str) -> Result<AppConfig, Error> {
    let config: AppConfig =
        toml::from_str(text).map_err(|e| Error::Config(format!("invalid TOML: {e}")))?;
    config.validate()?;
    Ok(config)
}

/// Reads a configuration file, or returns the defaults when `path` is `None`.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, Error> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            load_config_str(&text)
        }
        None => Ok(AppConfig::default()),
    }
}
