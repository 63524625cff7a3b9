//! File logging for the viewer.
//!
//! The terminal UI owns the screen, so logs only go to a per-session file.
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Setup logging to `<log_dir>/<session_id>/region-map.log`.
pub fn setup_logging(log_dir: Option<&Path>, session_id: Option<&str>) -> Result<PathBuf> {
    let log_dir = log_dir.map(Path::to_path_buf).unwrap_or_else(default_log_dir);

    let session_id = match session_id {
        Some(id) => id.to_string(),
        None => {
            let timestamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs())
                .unwrap_or_default();
            format!("session_{}", timestamp)
        }
    };

    let session_log_dir = log_dir.join(&session_id);
    std::fs::create_dir_all(&session_log_dir)?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "region-map.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // Keep the writer alive for the rest of the process.
    std::mem::forget(guard);

    tracing::info!("Logging initialized: session={}", session_id);
    tracing::info!("Log file: {}/region-map.log", session_log_dir.display());

    Ok(session_log_dir)
}

/// Platform cache directory, e.g. `~/.cache/region-map/logs` on Linux.
fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "region-map")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/region-map"))
        .join("logs")
}
