//! Dual logging setup: a daily rolling file plus stderr
//!
//! stdout is reserved for command output, so logs never go there.

use biggy_config::TelemetryConfig;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

const LOG_FILE_PREFIX: &str = "biggy.log";

/// Keeps the non-blocking writers flushing until dropped
pub struct LogGuards {
    _file: WorkerGuard,
    _stderr: WorkerGuard,
}

/// Install the global subscriber
///
/// `RUST_LOG` wins over the configured tracing level when set.
///
/// # Errors
/// Returns an error if the log directory cannot be created
pub fn init(telemetry: &TelemetryConfig, log_dir_override: Option<&str>) -> anyhow::Result<LogGuards> {
    let log_dir = resolve_log_dir(telemetry, log_dir_override);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);
    let (file_writer, file_guard): (NonBlocking, WorkerGuard) =
        tracing_appender::non_blocking(file_appender);
    let (stderr_writer, stderr_guard): (NonBlocking, WorkerGuard) =
        tracing_appender::non_blocking(std::io::stderr());
    let writer = file_writer.and(stderr_writer);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&telemetry.tracing_level));

    if telemetry.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_writer(writer)
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(writer)
            .with_env_filter(filter)
            .with_ansi(false)
            .init();
    }

    tracing::debug!(log_dir = %log_dir.display(), "Logging initialized");

    Ok(LogGuards {
        _file: file_guard,
        _stderr: stderr_guard,
    })
}

/// The `--log-dir` flag, then the configured directory, then the OS default
fn resolve_log_dir(telemetry: &TelemetryConfig, log_dir_override: Option<&str>) -> PathBuf {
    log_dir_override
        .or(telemetry.log_dir.as_deref())
        .map_or_else(get_default_log_dir, PathBuf::from)
}

/// Get the default log directory based on the operating system
fn get_default_log_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        // %LOCALAPPDATA%\biggy\logs
        std::env::var_os("LOCALAPPDATA").map_or_else(
            || PathBuf::from("logs"),
            |local_app_data| PathBuf::from(local_app_data).join("biggy").join("logs"),
        )
    }

    #[cfg(target_os = "macos")]
    {
        // ~/Library/Logs/biggy
        dirs::home_dir().map_or_else(
            || PathBuf::from("logs"),
            |home| home.join("Library").join("Logs").join("biggy"),
        )
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        let system_log_dir = Path::new("/var/log/biggy");

        if system_log_dir.exists() && is_writable(system_log_dir) {
            system_log_dir.to_path_buf()
        } else if let Some(data_dir) = dirs::data_dir() {
            // ~/.local/share/biggy/logs
            data_dir.join("biggy").join("logs")
        } else if let Some(home) = dirs::home_dir() {
            home.join(".biggy").join("logs")
        } else {
            PathBuf::from("logs")
        }
    }
}

/// Check if a directory is writable
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn is_writable(path: &Path) -> bool {
    tempfile::tempfile_in(path).is_ok()
}
