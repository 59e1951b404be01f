use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use hub_engine::{ClientSettings, DEFAULT_BACKEND_URL, MAX_POST_LIMIT};
use hub_logging::{LogDestination, DEFAULT_LOG_FILE};
use log::LevelFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

/// Terminal client for the Reddit summarize hub.
#[derive(Debug, Parser)]
#[command(name = "summarize_hub", version, about)]
pub struct Cli {
    /// Base URL of the summarization backend.
    #[arg(long, env = "SUMMARIZE_HUB_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    pub backend_url: String,

    /// Backend session cookie as `name=value`, copied from the browser after login.
    #[arg(long, env = "SUMMARIZE_HUB_SESSION", value_parser = parse_cookie)]
    pub session_cookie: Option<String>,

    /// Posts to summarize per subreddit (backend default when omitted).
    #[arg(
        long,
        env = "SUMMARIZE_HUB_POST_LIMIT",
        value_parser = clap::value_parser!(u8).range(1..=i64::from(MAX_POST_LIMIT))
    )]
    pub post_limit: Option<u8>,

    /// Connect-phase timeout. Requests themselves are not timed out.
    #[arg(long, default_value_t = 10)]
    pub connect_timeout_secs: u64,

    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,

    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    #[arg(long, default_value_t = LevelFilter::Info, value_parser = parse_level)]
    pub log_level: LevelFilter,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client: ClientSettings,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
}

impl TryFrom<Cli> for AppConfig {
    type Error = anyhow::Error;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let client = ClientSettings {
            base_url: cli.backend_url,
            connect_timeout: Duration::from_secs(cli.connect_timeout_secs),
            session_cookie: cli.session_cookie,
            post_limit: cli.post_limit,
            ..ClientSettings::default()
        };
        client
            .base()
            .with_context(|| format!("invalid backend url {:?}", client.base_url))?;

        let log_destination = match cli.log {
            LogTarget::File => LogDestination::File(cli.log_file),
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both(cli.log_file),
        };

        Ok(Self {
            client,
            log_destination,
            log_level: cli.log_level,
        })
    }
}

fn parse_level(raw: &str) -> Result<LevelFilter, String> {
    raw.parse()
        .map_err(|_| format!("unknown log level {raw:?} (off, error, warn, info, debug, trace)"))
}

fn parse_cookie(raw: &str) -> Result<String, String> {
    let raw = raw.trim();
    match raw.split_once('=') {
        Some((name, _)) if !name.trim().is_empty() => Ok(raw.to_string()),
        _ => Err("expected a cookie in the form name=value".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("summarize_hub").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_target_local_backend() {
        let config = AppConfig::try_from(parse(&[]).unwrap()).unwrap();
        assert_eq!(config.client.base_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.client.post_limit, None);
        assert_eq!(config.client.request_timeout, None);
        assert_eq!(config.client.connect_timeout, Duration::from_secs(10));
        assert_eq!(
            config.log_destination,
            LogDestination::File(PathBuf::from(DEFAULT_LOG_FILE))
        );
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = parse(&[
            "--backend-url",
            "https://hub.example.com",
            "--session-cookie",
            "session=abc",
            "--post-limit",
            "12",
            "--log",
            "both",
            "--log-level",
            "debug",
        ])
        .unwrap();
        let config = AppConfig::try_from(cli).unwrap();
        assert_eq!(config.client.base_url, "https://hub.example.com");
        assert_eq!(config.client.session_cookie.as_deref(), Some("session=abc"));
        assert_eq!(config.client.post_limit, Some(12));
        assert!(matches!(config.log_destination, LogDestination::Both(_)));
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn post_limit_outside_backend_range_is_rejected() {
        assert!(parse(&["--post-limit", "0"]).is_err());
        assert!(parse(&["--post-limit", "26"]).is_err());
        assert!(parse(&["--post-limit", "25"]).is_ok());
    }

    #[test]
    fn malformed_cookie_is_rejected() {
        assert!(parse(&["--session-cookie", "justavalue"]).is_err());
        assert!(parse(&["--session-cookie", "=value"]).is_err());
    }

    #[test]
    fn invalid_backend_url_is_a_config_error() {
        let cli = parse(&["--backend-url", "not a url"]).unwrap();
        assert!(AppConfig::try_from(cli).is_err());
    }
}
