//! Tracing subscriber initialization.
//!
//! Logs go to a file so the TUI stays clean; monitor with `tail -f` in a
//! separate terminal. `RUST_LOG` is respected, defaulting to `info`.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log directory could not be created.
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// Directory that failed to be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The log path has no filename or no parent directory.
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// A tracing subscriber is already installed.
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Install the file-backed tracing subscriber, creating the log directory if
/// needed.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| LoggingError::DirectoryCreation {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;
    let directory = log_path
        .parent()
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false) // no ANSI escapes in log files
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}
