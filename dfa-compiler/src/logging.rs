//! Installs the dual-sink (file + stdout) diagnostic subscriber described
//! by the original `logging.c` (`start_logging`/`stop_logging`/`say`), but
//! expressed with `tracing` rather than a process-wide `FILE*`. The core
//! never touches this module directly — it only ever emits
//! `tracing::{debug,warn,error}!` calls — this lives in the crate purely
//! so the CLI front-end has a single place to bracket the logger's
//! lifecycle, matching the original's explicit start/stop pair.

use std::path::Path;

/// The default log path, matching the original's `LOG_PATH` constant.
pub const DEFAULT_LOG_PATH: &str = "log.txt";

/// Environment variable overriding [`DEFAULT_LOG_PATH`].
pub const LOG_PATH_ENV: &str = "DFA_COMPILER_LOG";

/// Owns the non-blocking file writer's background worker. Dropping this
/// guard is the "stop" half of the start/stop bracket: it flushes any
/// buffered log lines before the process exits.
pub struct LoggerGuard {
    _file_guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Installs a layered subscriber: one `fmt` layer to stdout, one to the
/// log file at `path`, each with its own independent filter so narrowing
/// one sink never narrows the other. `quiet` only narrows the stdout
/// layer to `error`; the file layer stays at `info` (or whatever
/// `RUST_LOG` requests) regardless, so the file always gets everything —
/// matching the original's "every diagnostic reaches both sinks" contract
/// for the file half even when stdout is quieted.
pub fn start(path: &Path, quiet: bool) -> LoggerGuard {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, EnvFilter};

    let stdout_level = if quiet { "error" } else { "info" };
    let stdout_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(stdout_level));
    let file_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let log_dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let file_name = path
        .file_name()
        .map(|n| n.to_owned())
        .unwrap_or_else(|| DEFAULT_LOG_PATH.into());
    let appender = tracing_appender::rolling::never(
        log_dir.unwrap_or_else(|| Path::new(".")),
        file_name,
    );
    let (file_writer, file_guard) = tracing_appender::non_blocking(appender);

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_filter(stdout_filter);
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_filter(file_filter);

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .init();

    tracing::info!(path = %path.display(), "logging started");

    LoggerGuard {
        _file_guard: file_guard,
    }
}

impl Drop for LoggerGuard {
    fn drop(&mut self) {
        tracing::info!("logging stopped");
    }
}
