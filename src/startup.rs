use reminder_sync::components::reminders::{DesktopNotifier, FileWatcher, LogNotifier, Notifier};
use reminder_sync::components::SyncHandle;
use reminder_sync::config::Config;
use reminder_sync::error::Error;
use crate::shutdown;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,notify=warn")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Start the actor and the watcher, then run until a termination signal
pub async fn start_sync(config: Config) -> miette::Result<()> {
    info!("Target file: {}", config.target_file.display());
    info!("Calendar backend: {:?}", config.backend);

    let backend = config.backend.build();
    let notifier: Arc<dyn Notifier> = if config.desktop_notifications {
        Arc::new(DesktopNotifier)
    } else {
        Arc::new(LogNotifier)
    };

    let handle = SyncHandle::new(backend, notifier);

    if config.sync_on_start {
        // Failures were already reported by the actor
        if let Err(e) = handle.process_file(&config.target_file).await {
            warn!("Initial sync failed: {}", e);
        }
    }

    let watcher = FileWatcher::start(
        &config.target_file,
        Duration::from_millis(config.debounce_ms),
        handle.clone(),
    )?;

    shutdown::handle_signals(watcher, handle).await?;

    info!("Reminder sync stopped");
    Ok(())
}
