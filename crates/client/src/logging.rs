//! Logging to stderr and to a per-session log file.
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Installs the global subscriber.
///
/// stderr gets what `RUST_LOG` selects (INFO by default); the session file
/// under `log_dir/<session>/showdown.log` also keeps the engine traces.
///
/// # Returns
///
/// The guard flushing the file writer; keep it alive until exit.
pub fn setup_logging(log_dir: &Path, session_id: Option<&str>) -> Result<WorkerGuard> {
    let session_id = session_id.map_or_else(
        || {
            let timestamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |elapsed| elapsed.as_secs());
            format!("session_{timestamp}")
        },
        str::to_string,
    );

    let session_log_dir = log_dir.join(&session_id);
    std::fs::create_dir_all(&session_log_dir)?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "showdown.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let stderr_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(stderr_filter);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    tracing::info!("Logging initialized: session={}", session_id);
    tracing::debug!("Log file: {}/showdown.log", session_log_dir.display());

    Ok(guard)
}
