use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Raises the default filter so unsupported-construct warnings and the run summary show up.
    pub debug: bool,
    /// Optional directory for a daily rolling `gogr.log.<date>` file.
    pub log_dir: Option<PathBuf>,
}

/// Installs the global subscriber. Diagnostics go to stderr only; stdout is reserved for records.
pub fn init_logging(options: &LogOptions) -> Option<WorkerGuard> {
    let default_level = if options.debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .without_time();

    let registry = tracing_subscriber::registry().with(filter).with(stderr_layer);

    let Some(log_dir) = &options.log_dir else {
        let _ = registry.try_init();
        return None;
    };

    let _ = std::fs::create_dir_all(log_dir);

    // Roll daily: gogr.log.2024-01-21
    let file_appender = tracing_appender::rolling::daily(log_dir, "gogr.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // File layer: no ANSI colors
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let _ = registry.with(file_layer).try_init();
    Some(guard)
}
