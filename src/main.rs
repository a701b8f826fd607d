//! kamar-notices binary entrypoint: fetch one day's notices and print them.

mod args;

use std::fmt;
use std::process::ExitCode;
use std::sync::OnceLock;

use clap::Parser;
use kamar_notices::{NoticeDate, config};

use crate::args::render::{render_json, render_text};
use crate::args::utils::{Result, build_client, selection};
use crate::args::{Args, determine_log_level};

/// Log timestamp format: local time, second precision.
struct NoticesTimer;

impl tracing_subscriber::fmt::time::FormatTime for NoticesTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S"))
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Install the stderr tracing subscriber.
///
/// Inputs:
/// - `level`: Default filter when `RUST_LOG` is not set.
///
/// Details:
/// - Output goes through a non-blocking writer so logging never stalls the request.
/// - The writer guard lives in `LOG_GUARD` so buffered lines are flushed at exit.
fn init_logging(level: &str) {
    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_timer(NoticesTimer)
        .init();
    let _ = LOG_GUARD.set(guard);
}

/// Fetch the requested day and print it in the requested format.
async fn run(args: &Args, settings: &config::Settings) -> Result<()> {
    let client = build_client(args, settings)?;
    let date = args.date.map_or(NoticeDate::Today, NoticeDate::Date);
    tracing::info!(url = client.url(), date = ?date, "fetching notices");

    let notices = client.retrieve(date).await?;
    let selection = selection(args);
    let output = if args.json {
        render_json(&notices, selection)?
    } else {
        render_text(&notices, selection)
    };
    print!("{output}");
    if args.json {
        println!();
    }
    tracing::info!(count = notices.len(), "printed notices");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let settings = config::load(args.config.as_deref());
    init_logging(&determine_log_level(&args, settings.as_ref().ok()));

    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(error = %e, "failed to load settings");
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    match run(&args, &settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(notice_err) = err.downcast_ref::<kamar_notices::NoticeError>() {
                tracing::error!(kind = notice_err.kind(), error = %notice_err, "retrieval failed");
            } else {
                tracing::error!(error = %err, "retrieval failed");
            }
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
