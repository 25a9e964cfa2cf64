//! File logging. The terminal belongs to the TUI, so nothing is written to
//! stdout or stderr once the UI is up.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{LoggingSettings, default_log_dir};

pub const LOG_ENV: &str = "TAPEDECK_LOG";
pub const LOG_FILE: &str = "tapedeck.log";

/// Filter from `$TAPEDECK_LOG`, else the configured level.
fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn log_dir(settings: &LoggingSettings) -> Option<PathBuf> {
    settings.directory.clone().or_else(default_log_dir)
}

/// Install the global subscriber writing to `<dir>/tapedeck.log`.
///
/// Returns `None` (logging off) when no directory is usable. Keep the guard
/// alive until exit so buffered lines are flushed.
pub fn init(settings: &LoggingSettings) -> Option<WorkerGuard> {
    let dir = log_dir(settings)?;
    init_in(&dir, &settings.level)
}

fn init_in(dir: &Path, level: &str) -> Option<WorkerGuard> {
    std::fs::create_dir_all(dir).ok()?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let subscriber = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_target(true)
        .with_thread_names(true)
        .with_ansi(false)
        .with_env_filter(filter(level))
        .finish();

    tracing::subscriber::set_global_default(subscriber).ok()?;
    Some(guard)
}
