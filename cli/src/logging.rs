use std::path::Path;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "mtodo.log";
const DEFAULT_FILTER: &str = "warn";

/// Keeps the background log writer alive; dropping it flushes.
pub struct LoggingGuard {
    _guard: Option<WorkerGuard>,
}

/// Logs go to `<log_dir>/mtodo.log` so the terminal UI is left alone. An
/// in-memory session has no directory and logs to stderr instead, unless
/// the terminal UI owns the screen, in which case nothing is logged.
/// `RUST_LOG` overrides the default `warn` filter.
pub fn init_logging(log_dir: Option<&Path>, owns_screen: bool) -> Result<LoggingGuard> {
    if log_dir.is_none() && owns_screen {
        return Ok(LoggingGuard { _guard: None });
    }

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(env_filter);

    let guard = match log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_target(true),
                )
                .try_init()?;
            Some(guard)
        }
        None => {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(false),
                )
                .try_init()?;
            None
        }
    };

    tracing::debug!(log_dir = ?log_dir, "logging initialized");
    Ok(LoggingGuard { _guard: guard })
}
