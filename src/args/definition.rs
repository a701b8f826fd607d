//! Command-line argument definition.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

/// kamar-notices - Print the daily notices of a KAMAR school portal
#[derive(Parser, Debug)]
#[command(name = "kamar-notices")]
#[command(version)]
#[command(about = "Print the daily notices of a KAMAR school portal", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Portal host or URL (e.g. portal.school.nz); overrides `host` in the config file
    #[arg(long)]
    pub host: Option<String>,

    /// Use plain HTTP for hosts given without a scheme
    #[arg(long)]
    pub http: bool,

    /// Day to fetch, as dd/mm/yyyy or yyyy-mm-dd (default: today)
    #[arg(short, long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,

    /// Print notices as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Only show general notices
    #[arg(long, conflicts_with = "meetings_only")]
    pub general_only: bool,

    /// Only show meeting notices
    #[arg(long)]
    pub meetings_only: bool,

    /// Request timeout in seconds (default: none)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Path to the settings file (default: ~/.config/kamar-notices/notices.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,
}

/// What: Parse a `--date` value.
///
/// Inputs:
/// - `raw`: `dd/mm/yyyy` (the portal's own format) or ISO `yyyy-mm-dd`.
///
/// Output:
/// - The calendar date, or a message clap shows to the user.
///
/// # Errors
/// - When `raw` matches neither format.
pub fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .map_err(|_| format!("invalid date `{raw}`, expected dd/mm/yyyy or yyyy-mm-dd"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_arg_accepts_both_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5);
        assert_eq!(parse_date_arg("05/03/2024").ok(), expected);
        assert_eq!(parse_date_arg("2024-03-05").ok(), expected);
        assert!(parse_date_arg("March 5th").is_err());
    }

    #[test]
    /// What: Filter flags cannot be combined.
    ///
    /// Inputs:
    /// - `--general-only --meetings-only`.
    ///
    /// Output:
    /// - clap rejects the command line.
    fn filter_flags_conflict() {
        let res = Args::try_parse_from([
            "kamar-notices",
            "--general-only",
            "--meetings-only",
        ]);
        assert!(res.is_err());
        let args = Args::try_parse_from(["kamar-notices", "--host", "p.nz", "-d", "2024-03-05"])
            .expect("valid args");
        assert_eq!(args.host.as_deref(), Some("p.nz"));
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2024, 3, 5));
    }
}
