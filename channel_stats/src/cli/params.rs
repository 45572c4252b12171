use crate::aggregator::AggregatorSettings;
use crate::config::AppConfig;

use super::commands::ReportArgs;

/// Pipeline settings for one report: config values overridden by flags.
///
/// `--no-videos` fetches nothing; otherwise at least `--videos` uploads are fetched.
pub fn report_settings(config: &AppConfig, args: &ReportArgs) -> AggregatorSettings {
    let mut settings = config.aggregator_settings();
    if let Some(months) = args.months {
        settings.months = months;
    }
    settings.video_limit = if args.no_videos {
        0
    } else {
        let wanted = u32::try_from(args.videos).unwrap_or(u32::MAX);
        settings.video_limit.max(wanted)
    };
    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::{Cli, Commands};
    use clap::Parser;

    fn args(argv: &[&str]) -> ReportArgs {
        let mut full = vec!["channel-stats", "report"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Commands::Report(a) => a,
            _ => unreachable!(),
        }
    }

    #[test]
    fn flags_override_config() {
        let cfg = AppConfig::default();
        let s = report_settings(&cfg, &args(&["x", "--months", "6"]));
        assert_eq!(s.months, 6);
        assert_eq!(s.video_limit, 50);

        let s = report_settings(&cfg, &args(&["x", "--videos", "80"]));
        assert_eq!(s.video_limit, 80);

        let s = report_settings(&cfg, &args(&["x", "--no-videos"]));
        assert_eq!(s.video_limit, 0);
    }
}
