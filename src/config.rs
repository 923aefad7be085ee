use std::time::Duration;

use clap::Parser;
use thiserror::Error;
use tracing::Level;

use crate::apps::AppKind;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "cloud-desk",
    version = env!("CARGO_PKG_VERSION"),
    about = "A cloud desktop with floating windows, in your terminal"
)]
pub struct Cli {
    /// Input poll interval.
    #[arg(long = "poll-ms", value_name = "MILLIS", default_value_t = 16)]
    pub poll_ms: u64,

    /// Delay before mock panel data "arrives".
    #[arg(long = "feed-delay-ms", value_name = "MILLIS", default_value_t = 600)]
    pub feed_delay_ms: u64,

    /// Open an app at start-up. Repeatable.
    #[arg(long = "open", value_name = "APP")]
    pub open: Vec<AppKind>,

    /// Start with mouse capture disabled.
    #[arg(long = "no-mouse")]
    pub no_mouse: bool,

    /// Maximum tracing level written to the log buffer.
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "debug")]
    pub log_level: Level,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("poll interval must be between 1 and 1000 ms, got {0}")]
    PollInterval(u64),
    #[error("feed delay must be at most 60000 ms, got {0}")]
    FeedDelay(u64),
}

/// Validated start-up settings for the desktop shell.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub poll_interval: Duration,
    pub feed_delay: Duration,
    pub open: Vec<AppKind>,
    pub mouse_capture: bool,
    pub log_level: Level,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(16),
            feed_delay: Duration::from_millis(600),
            open: Vec::new(),
            mouse_capture: true,
            log_level: Level::DEBUG,
        }
    }
}

impl TryFrom<&Cli> for ShellConfig {
    type Error = ConfigError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        if !(1..=1000).contains(&cli.poll_ms) {
            return Err(ConfigError::PollInterval(cli.poll_ms));
        }
        if cli.feed_delay_ms > 60_000 {
            return Err(ConfigError::FeedDelay(cli.feed_delay_ms));
        }
        Ok(Self {
            poll_interval: Duration::from_millis(cli.poll_ms),
            feed_delay: Duration::from_millis(cli.feed_delay_ms),
            open: cli.open.clone(),
            mouse_capture: !cli.no_mouse,
            log_level: cli.log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("cloud-desk").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_validate() {
        let cfg = ShellConfig::try_from(&parse(&[])).unwrap();
        assert_eq!(cfg.poll_interval, Duration::from_millis(16));
        assert_eq!(cfg.feed_delay, Duration::from_millis(600));
        assert!(cfg.mouse_capture);
        assert!(cfg.open.is_empty());
        assert_eq!(cfg.log_level, Level::DEBUG);
    }

    #[test]
    fn repeated_open_and_flags() {
        let cli = parse(&[
            "--open",
            "terminal",
            "--open",
            "rag-console",
            "--no-mouse",
            "--log-level",
            "info",
        ]);
        let cfg = ShellConfig::try_from(&cli).unwrap();
        assert_eq!(cfg.open, vec![AppKind::Terminal, AppKind::RagConsole]);
        assert!(!cfg.mouse_capture);
        assert_eq!(cfg.log_level, Level::INFO);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert_eq!(
            ShellConfig::try_from(&parse(&["--poll-ms", "0"])).unwrap_err(),
            ConfigError::PollInterval(0)
        );
        assert_eq!(
            ShellConfig::try_from(&parse(&["--feed-delay-ms", "60001"])).unwrap_err(),
            ConfigError::FeedDelay(60_001)
        );
    }

    #[test]
    fn unknown_app_fails_parsing() {
        let err = Cli::try_parse_from(["cloud-desk", "--open", "spreadsheet"]).unwrap_err();
        assert!(err.to_string().contains("spreadsheet"));
    }
}
