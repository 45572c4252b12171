use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::synthesizer::MAX_HISTORICAL_MONTHS;

#[derive(Parser, Debug)]
#[command(name = "channel-stats", author, version, about)]
pub struct Cli {
    /// Path to an optional TOML config file
    #[arg(short, long, global = true, env = "CHANNEL_STATS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG still takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print statistics of one channel and optionally export charts and CSV files
    Report(ReportArgs),

    /// Run the web dashboard
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: SocketAddr,

        /// Fixed seed for the synthetic history
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Channel ID (UC...), @handle, legacy username or channel name
    pub channel: String,

    /// Number of recent videos to print
    #[arg(long, default_value_t = 5)]
    pub videos: usize,

    /// Skip the recent-videos block
    #[arg(long)]
    pub no_videos: bool,

    /// Write SVG charts of the synthetic history
    #[arg(long)]
    pub save_charts: bool,

    /// Directory for charts and CSV files (overrides the config)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Write summary and history CSV files
    #[arg(long)]
    pub export_csv: bool,

    /// Number of synthetic months (overrides the config)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_HISTORICAL_MONTHS as i64))]
    pub months: Option<u32>,

    /// Fixed seed for the synthetic history
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the full bundle as JSON instead of the text report
    #[arg(long)]
    pub json: bool,
}
