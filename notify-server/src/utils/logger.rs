//! Logging Infrastructure
//!
//! Structured logging with an env-filter, optional JSON output and optional
//! daily rolling files.

use std::path::Path;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "notify_server=info,tower_http=info";

/// Initialize the logger from `RUST_LOG`, falling back to the default filter
pub fn init_logger() {
    init_logger_with_file(None, false, None);
}

/// Initialize the logger with an optional level, JSON output and file output
///
/// `RUST_LOG` wins over `log_level` when set. The returned guard must be
/// held for as long as file logging should keep flushing.
pub fn init_logger_with_file(
    log_level: Option<&str>,
    json: bool,
    log_dir: Option<&str>,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match log_level {
        Some(level) => EnvFilter::new(format!(
            "notify_server={level},shared={level},tower_http={level}"
        )),
        None => EnvFilter::new(DEFAULT_FILTER),
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists() {
            let file_appender = tracing_appender::rolling::daily(log_path, "notify-server");
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            let builder = builder.with_writer(writer).with_ansi(false);
            let result = if json {
                builder.json().try_init()
            } else {
                builder.try_init()
            };
            if let Err(e) = result {
                eprintln!("Logger already initialized: {e}");
            }
            return Some(guard);
        }
        eprintln!("Log directory {dir} does not exist, logging to stdout");
    }

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        eprintln!("Logger already initialized: {e}");
    }
    None
}
