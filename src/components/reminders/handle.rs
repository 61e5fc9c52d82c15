use super::actor::{SyncActor, SyncActorHandle};
use super::models::SyncReport;
use super::notifications::Notifier;
use super::reconciler::Reconciler;
use crate::components::calendar_backend::CalendarBackend;
use crate::error::SyncResult;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Handle for interacting with the sync actor
#[derive(Clone)]
pub struct SyncHandle {
    actor_handle: SyncActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl SyncHandle {
    /// Create a new SyncHandle and spawn the actor
    pub fn new(backend: Arc<dyn CalendarBackend>, notifier: Arc<dyn Notifier>) -> Self {
        let reconciler = Reconciler::new(backend, Arc::clone(&notifier));
        Self::with_reconciler(reconciler, notifier)
    }

    /// Spawn the actor around a prepared reconciler
    pub fn with_reconciler(reconciler: Reconciler, notifier: Arc<dyn Notifier>) -> Self {
        let (mut actor, handle) = SyncActor::new(reconciler, notifier);

        // Spawn a task to run the actor
        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Read a document and reconcile every annotation in it
    pub async fn process_file(&self, path: impl Into<PathBuf>) -> SyncResult<SyncReport> {
        self.actor_handle.process_file(path).await
    }

    /// Reconcile every annotation in already loaded text
    pub async fn process_text(&self, content: impl Into<String>) -> SyncResult<SyncReport> {
        self.actor_handle.process_text(content).await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> SyncResult<()> {
        self.actor_handle.shutdown().await
    }
}
