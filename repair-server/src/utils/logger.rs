//! Logging Infrastructure
//!
//! `tracing-subscriber` with an `EnvFilter`; `RUST_LOG` wins over `LOG_LEVEL`.
//! Optional daily-rolling file output.

use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::core::ServerError;

const DEFAULT_LEVEL: &str = "info";

/// Initialize the logger (stdout, default level)
pub fn init_logger() -> Result<(), ServerError> {
    init_logger_with_file(None, None)
}

/// Initialize the logger with optional file output
///
/// File output is used only when `log_dir` already exists.
pub fn init_logger_with_file(
    log_level: Option<&str>,
    log_dir: Option<&str>,
) -> Result<(), ServerError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(log_level)));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.is_dir() {
            let file_appender = tracing_appender::rolling::daily(log_path, "repair-server");
            return subscriber
                .with_ansi(false)
                .with_writer(file_appender)
                .try_init()
                .map_err(|e| ServerError::Logger(e.to_string()));
        }
    }

    subscriber
        .try_init()
        .map_err(|e| ServerError::Logger(e.to_string()))
}

/// Filter directives for our crate, the HTTP trace layer and security events
fn filter_directives(log_level: Option<&str>) -> String {
    let level = log_level
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(DEFAULT_LEVEL)
        .to_ascii_lowercase();
    format!("repair_server={level},tower_http={level},security={level},notify={level}")
}
