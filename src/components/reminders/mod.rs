//! Reminder extraction and calendar reconciliation.

mod actor;
mod handle;
pub mod models;
pub mod notifications;
pub mod parser;
pub mod reconciler;
pub mod time;
pub mod watcher;

pub use handle::SyncHandle;
pub use models::{EventWindow, ReconcileOutcome, ReminderRecord, SyncReport};
pub use notifications::{DesktopNotifier, LogNotifier, Notifier};
pub use parser::parse_reminders;
pub use reconciler::Reconciler;
pub use watcher::FileWatcher;
