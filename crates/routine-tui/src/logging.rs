use std::path::Path;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "info,hyper=warn,reqwest=warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env("ROUTINE_LOG").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// The terminal belongs to the UI, so the TUI logs to a daily rolling file.
/// Keep the guard alive until exit or buffered lines are lost.
pub fn init_file_logging(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::daily(log_dir, "routine.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}

/// Plain stderr logging for the one-shot subcommands
pub fn init_stderr_logging() {
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
