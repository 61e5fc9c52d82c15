//! Watches the reminder document and triggers a sync run when it changes.

use super::handle::SyncHandle;
use crate::error::{watcher_error, SyncResult};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

/// Watches a single file and forwards debounced changes to the sync actor
pub struct FileWatcher {
    // Dropping the watcher stops event delivery
    _watcher: RecommendedWatcher,
    task: JoinHandle<()>,
    target: PathBuf,
}

impl FileWatcher {
    /// Start watching `target`.
    ///
    /// The parent directory is watched rather than the file itself so that
    /// editors which save by replacing the file keep triggering runs.
    pub fn start(target: &Path, debounce: Duration, handle: SyncHandle) -> SyncResult<Self> {
        let target = target
            .canonicalize()
            .unwrap_or_else(|_| target.to_path_buf());
        let parent = target
            .parent()
            .ok_or_else(|| watcher_error(&format!("{} has no parent directory", target.display())))?
            .to_path_buf();
        let file_name = target
            .file_name()
            .ok_or_else(|| watcher_error(&format!("{} is not a file path", target.display())))?
            .to_os_string();

        // Channel for forwarding notify events to the async debouncer
        let (fs_tx, fs_rx) = mpsc::channel::<()>(64);

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| match result {
                Ok(event) if is_relevant(&event, &file_name) => {
                    let _ = fs_tx.try_send(());
                }
                Ok(_) => {}
                Err(e) => warn!("File watcher error: {}", e),
            },
            notify::Config::default(),
        )?;
        watcher.watch(&parent, RecursiveMode::NonRecursive)?;

        info!("Watching {} for changes", target.display());

        let task = tokio::spawn(debounce_loop(fs_rx, target.clone(), debounce, handle));

        Ok(Self {
            _watcher: watcher,
            task,
            target,
        })
    }

    /// Stop watching and end the forwarding task
    pub fn stop(self) {
        info!("Stopped watching {}", self.target.display());
        self.task.abort();
    }
}

/// Only creations and modifications of the target file start a run
pub fn is_relevant(event: &Event, file_name: &OsString) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name.as_os_str()))
}

/// Coalesce bursts of events into a single sync run
async fn debounce_loop(
    mut fs_rx: mpsc::Receiver<()>,
    target: PathBuf,
    debounce: Duration,
    handle: SyncHandle,
) {
    while fs_rx.recv().await.is_some() {
        sleep(debounce).await;
        while fs_rx.try_recv().is_ok() {}

        debug!("Change detected in {}", target.display());
        match handle.process_file(&target).await {
            Ok(report) => debug!("Processed {} record(s)", report.entries.len()),
            // Already reported to the user by the actor, keep watching
            Err(e) => error!("Sync run for {} failed: {}", target.display(), e),
        }
    }
}
