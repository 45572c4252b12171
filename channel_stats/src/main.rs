use std::sync::Arc;

use anyhow::Context;
use channel_stats::{
    StatsAggregator, YouTubeRestProvider,
    cli::{
        commands::{Cli, Commands, ReportArgs},
        params::report_settings,
    },
    config::{AppConfig, load_config},
    dashboard::{DashboardState, serve},
    io::{chart::ChartSink, dataframe::CsvSink, sink::DataSink},
    report::{guidance, render_report},
    synthesizer::RandomVariation,
};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("channel_stats={default_level},warn")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn provider(config: &AppConfig) -> anyhow::Result<Arc<YouTubeRestProvider>> {
    let provider = YouTubeRestProvider::from_env_var(&config.api_key_env, config.rest_settings())
        .with_context(|| format!("set {} (or put it in a .env file)", config.api_key_env))?;
    Ok(Arc::new(provider))
}

async fn run_report(config: &AppConfig, args: ReportArgs) -> anyhow::Result<()> {
    let settings = report_settings(config, &args);
    let aggregator = StatsAggregator::with_settings(provider(config)?, settings);
    let mut variation = RandomVariation::for_seed(args.seed);

    info!(channel = %args.channel, "loading channel statistics");
    let bundle = match aggregator
        .get_comprehensive_stats(&args.channel, &mut variation)
        .await
    {
        Ok(bundle) => bundle,
        Err(e) => {
            error!(kind = ?e.kind(), "{e}");
            eprintln!("{}", guidance(e.kind()));
            return Err(anyhow::Error::new(e));
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&bundle)?);
    } else {
        let videos = (!args.no_videos).then_some(args.videos);
        print!("{}", render_report(&bundle, videos));
    }

    let output_dir = args.output_dir.clone().unwrap_or_else(|| config.output_dir.clone());
    if args.save_charts {
        let written = ChartSink::new(&output_dir, config.chart.clone())
            .write(&bundle)
            .await?;
        for path in written {
            eprintln!("chart saved: {}", path.display());
        }
    }
    if args.export_csv {
        let written = CsvSink::new(&output_dir).write(&bundle).await?;
        for path in written {
            eprintln!("csv saved: {}", path.display());
        }
    }

    Ok(())
}

async fn run_serve(config: &AppConfig, addr: std::net::SocketAddr, seed: Option<u64>) -> anyhow::Result<()> {
    let state = DashboardState {
        aggregator: StatsAggregator::with_settings(provider(config)?, config.aggregator_settings()),
        palette: config.chart.clone(),
        seed,
    };
    serve(addr, state)
        .await
        .with_context(|| format!("dashboard on {addr} stopped"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref()).context("failed to load configuration")?;

    match cli.command {
        Commands::Report(args) => run_report(&config, args).await,
        Commands::Serve { addr, seed } => run_serve(&config, addr, seed).await,
    }
}

