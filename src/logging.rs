//! File logging bootstrap.
//!
//! The terminal belongs to the TUI, so log lines only ever go to rotating
//! files under the profile's data directory.
//!
//! # Invariants
//! - Initialisation happens at most once per process.
//! - Initialisation never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

const LOG_FILE_BASENAME: &str = "todo-card";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

static LOGGER: OnceLock<LoggingState> = OnceLock::new();

struct LoggingState {
    log_dir: PathBuf,
    _handle: LoggerHandle,
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("unsupported log level `{0}`; expected trace|debug|info|warn|error")]
    UnsupportedLevel(String),
    #[error("failed to create log directory `{path}`: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to start logger: {0}")]
    Backend(#[from] flexi_logger::FlexiLoggerError),
    #[error("logging already initialized at `{0}`")]
    AlreadyInitialized(PathBuf),
}

/// Start the file logger. Calling again with the same directory is a no-op.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<(), LoggingError> {
    let level = normalize_level(level)?;

    if let Some(state) = LOGGER.get() {
        if state.log_dir == log_dir {
            return Ok(());
        }
        return Err(LoggingError::AlreadyInitialized(state.log_dir.clone()));
    }

    std::fs::create_dir_all(log_dir).map_err(|source| LoggingError::CreateDir {
        path: log_dir.to_path_buf(),
        source,
    })?;

    let handle = Logger::try_with_str(level)?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()?;

    // A racing second initialiser would already have failed in `start()`
    let _ = LOGGER.set(LoggingState {
        log_dir: log_dir.to_path_buf(),
        _handle: handle,
    });

    info!(
        "event=app_start status=ok platform={} version={} level={} log_dir={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION"),
        level,
        log_dir.display()
    );

    Ok(())
}

fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => Err(LoggingError::UnsupportedLevel(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_levels() {
        assert_eq!(normalize_level(" INFO ").unwrap(), "info");
        assert_eq!(normalize_level("warning").unwrap(), "warn");
        assert!(matches!(normalize_level("loud"), Err(LoggingError::UnsupportedLevel(_))));
    }

    #[test]
    fn rejects_bad_level_before_touching_disk() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("logs");
        assert!(init_logging("verbose", &target).is_err());
        assert!(!target.exists());
    }

    #[test]
    fn unwritable_log_dir_is_reported_not_panicked() {
        // A regular file where the directory should be
        let file = tempfile::NamedTempFile::new().unwrap();
        let target = file.path().join("logs");
        let err = init_logging("info", &target).unwrap_err();
        assert!(matches!(err, LoggingError::CreateDir { .. }));
        assert!(err.to_string().contains("failed to create log directory"));
    }
}
