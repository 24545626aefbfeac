use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use quick_define::app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _log_guard = init_logging();
    tracing::info!("quick-define starting");
    let result = app::run().await;
    if let Err(error) = &result {
        tracing::error!(?error, "application error");
    }
    tracing::info!("quick-define exited");
    result
}

/// Logs go to a file so the alternate screen stays clean. The returned
/// guard must stay alive for the whole run or buffered lines are lost.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let dir = logs_dir();
    std::fs::create_dir_all(&dir).ok()?;
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("quick-define.log"))
        .ok()?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Some(guard)
}

fn logs_dir() -> PathBuf {
    std::env::var_os("XDG_STATE_HOME")
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("state"))
        })
        .unwrap_or_else(std::env::temp_dir)
        .join("quick-define")
}
