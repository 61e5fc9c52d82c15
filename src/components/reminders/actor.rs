use super::models::SyncReport;
use super::notifications::{file_failure_message, Notifier};
use super::reconciler::Reconciler;
use crate::error::{other_error, Error, SyncResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

/// The sync actor, runs one processing request at a time
pub struct SyncActor {
    reconciler: Reconciler,
    notifier: Arc<dyn Notifier>,
    command_rx: mpsc::Receiver<SyncCommand>,
}

/// Commands that can be sent to the sync actor
pub enum SyncCommand {
    ProcessFile(PathBuf, mpsc::Sender<SyncResult<SyncReport>>),
    ProcessText(String, mpsc::Sender<SyncResult<SyncReport>>),
    Shutdown,
}

/// Handle for communicating with the sync actor
#[derive(Clone)]
pub struct SyncActorHandle {
    command_tx: mpsc::Sender<SyncCommand>,
}

impl SyncActorHandle {
    async fn request(
        &self,
        build: impl FnOnce(mpsc::Sender<SyncResult<SyncReport>>) -> SyncCommand,
    ) -> SyncResult<SyncReport> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(build(response_tx))
            .await
            .map_err(|e| other_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| other_error("Response channel closed"))?
    }

    /// Read a document and reconcile every annotation in it
    pub async fn process_file(&self, path: impl Into<PathBuf>) -> SyncResult<SyncReport> {
        let path = path.into();
        self.request(|tx| SyncCommand::ProcessFile(path, tx)).await
    }

    /// Reconcile every annotation in already loaded text
    pub async fn process_text(&self, content: impl Into<String>) -> SyncResult<SyncReport> {
        let content = content.into();
        self.request(|tx| SyncCommand::ProcessText(content, tx)).await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> SyncResult<()> {
        let _ = self.command_tx.send(SyncCommand::Shutdown).await;
        Ok(())
    }
}

impl SyncActor {
    /// Create a new actor and return its handle
    pub fn new(reconciler: Reconciler, notifier: Arc<dyn Notifier>) -> (Self, SyncActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            reconciler,
            notifier,
            command_rx,
        };

        let handle = SyncActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Sync actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                SyncCommand::ProcessFile(path, response_tx) => {
                    let result = self.process_file(&path).await;
                    let _ = response_tx.send(result).await;
                }
                SyncCommand::ProcessText(content, response_tx) => {
                    let report = self.run_report(&content).await;
                    let _ = response_tx.send(Ok(report)).await;
                }
                SyncCommand::Shutdown => {
                    info!("Sync actor shutting down");
                    break;
                }
            }
        }

        info!("Sync actor shut down");
    }

    /// Read and process one document, a read failure processes nothing
    async fn process_file(&self, path: &Path) -> SyncResult<SyncReport> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(source) => {
                let e = Error::FileRead {
                    path: path.to_path_buf(),
                    source,
                };
                self.notifier.notify_error(&file_failure_message(&e));
                return Err(e);
            }
        };

        info!("Processing {}", path.display());
        Ok(self.run_report(&content).await)
    }

    async fn run_report(&self, content: &str) -> SyncReport {
        let report = self.reconciler.process_text(content).await;
        info!(
            "Sync run finished: {} record(s), {} failure(s)",
            report.entries.len(),
            report.failures()
        );
        report
    }
}
