use reminder_sync::components::reminders::FileWatcher;
use reminder_sync::components::SyncHandle;
use reminder_sync::error::SyncResult;
use tracing::{error, info};

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
#[cfg(windows)]
use tokio::signal::windows::{ctrl_break, ctrl_c};

/// Wait for a termination signal, then stop watching and drain the actor
pub async fn handle_signals(watcher: FileWatcher, handle: SyncHandle) -> SyncResult<()> {
    // Wait for a termination signal
    wait_for_signal().await?;

    // No new triggers once the watcher is gone
    watcher.stop();

    // The actor finishes the run in progress before it sees this
    if let Err(e) = handle.shutdown().await {
        error!("Error shutting down sync actor: {:?}", e);
    } else {
        info!("Sync actor shut down successfully");
    }

    Ok(())
}

/// Platform-specific signal handling implementation
#[cfg(unix)]
async fn wait_for_signal() -> SyncResult<()> {
    // Handle SIGTERM (sent by service managers on stop)
    let mut sigterm = signal(SignalKind::terminate())?;
    // Handle SIGINT (Ctrl+C)
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::select! {
        _ = sigterm.recv() => {
            info!("Received SIGTERM signal, initiating graceful shutdown");
        }
        _ = sigint.recv() => {
            info!("Received SIGINT signal, initiating graceful shutdown");
        }
    }

    Ok(())
}

/// Platform-specific signal handling implementation
#[cfg(windows)]
async fn wait_for_signal() -> SyncResult<()> {
    // Handle Ctrl+C
    let mut ctrlc = ctrl_c()?;
    // Handle Ctrl+Break
    let mut ctrlbreak = ctrl_break()?;

    tokio::select! {
        _ = ctrlc.recv() => {
            info!("Received Ctrl+C signal, initiating graceful shutdown");
        }
        _ = ctrlbreak.recv() => {
            info!("Received Ctrl+Break signal, initiating graceful shutdown");
        }
    }

    Ok(())
}
