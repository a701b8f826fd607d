//! Shared helpers for turning arguments and settings into a client call.

use std::time::Duration;

use kamar_notices::NoticeClient;
use kamar_notices::config::Settings;

use crate::args::Args;
use crate::args::render::Selection;

/// Result type alias for command-line operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Determine the log level from arguments and settings.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - `--verbose` wins over `--log-level`, which wins over the config file; default is `warn`
///   so normal runs keep stderr quiet.
pub fn determine_log_level(args: &Args, settings: Option<&Settings>) -> String {
    if args.verbose {
        return "debug".to_string();
    }
    args.log_level
        .clone()
        .or_else(|| settings.and_then(|s| s.log_level.clone()))
        .unwrap_or_else(|| "warn".to_string())
}

/// What: Build the notice client described by arguments and settings.
///
/// Output:
/// - Client for the chosen host with the chosen scheme and timeout.
///
/// # Errors
/// - No host in either the arguments or the settings
/// - The HTTP client cannot be built
pub fn build_client(args: &Args, settings: &Settings) -> Result<NoticeClient> {
    let host = args
        .host
        .as_deref()
        .or(settings.host.as_deref())
        .ok_or("no portal host given; pass --host or set `host` in notices.toml")?;
    let use_https = !args.http && settings.use_https;

    let mut builder = reqwest::Client::builder();
    if let Some(secs) = args.timeout.or(settings.timeout_secs) {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let http = builder.build()?;
    Ok(NoticeClient::with_http_client(host, use_https, http))
}

/// Which notice lists the user asked to see.
pub const fn selection(args: &Args) -> Selection {
    if args.general_only {
        Selection::General
    } else if args.meetings_only {
        Selection::Meetings
    } else {
        Selection::All
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["kamar-notices"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).expect("valid args")
    }

    #[test]
    /// What: Log level precedence is verbose, flag, settings, default.
    ///
    /// Inputs:
    /// - Combinations of `-v`, `--log-level` and a settings log level.
    ///
    /// Output:
    /// - The highest-priority source wins.
    fn log_level_precedence() {
        let settings = Settings {
            log_level: Some("info".to_string()),
            ..Settings::default()
        };
        assert_eq!(determine_log_level(&args(&["-v"]), Some(&settings)), "debug");
        assert_eq!(
            determine_log_level(&args(&["--log-level", "trace"]), Some(&settings)),
            "trace"
        );
        assert_eq!(determine_log_level(&args(&[]), Some(&settings)), "info");
        assert_eq!(determine_log_level(&args(&[]), None), "warn");
    }

    #[test]
    /// What: The client URL reflects host and scheme from flags over settings.
    ///
    /// Inputs:
    /// - Settings host with HTTPS; then `--host` with `--http`.
    ///
    /// Output:
    /// - Settings host over HTTPS; flag host over HTTP.
    fn client_uses_flags_over_settings() {
        let settings = Settings {
            host: Some("file.school.nz".to_string()),
            ..Settings::default()
        };
        let client = build_client(&args(&[]), &settings).expect("client from settings");
        assert_eq!(client.url(), "https://file.school.nz/api/api.php");

        let client = build_client(&args(&["--host", "flag.school.nz", "--http"]), &settings)
            .expect("client from flags");
        assert_eq!(client.url(), "http://flag.school.nz/api/api.php");
    }

    #[test]
    fn missing_host_is_an_error() {
        assert!(build_client(&args(&[]), &Settings::default()).is_err());
    }

    #[test]
    fn selection_follows_filter_flags() {
        assert_eq!(selection(&args(&[])), Selection::All);
        assert_eq!(selection(&args(&["--general-only"])), Selection::General);
        assert_eq!(selection(&args(&["--meetings-only"])), Selection::Meetings);
    }
}
