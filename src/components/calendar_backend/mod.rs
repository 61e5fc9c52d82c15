mod applescript;
mod memory;

pub use applescript::AppleScriptBackend;
pub use memory::{MemoryBackend, StoredEvent, DEFAULT_CALENDAR};

use crate::error::{config_error, SyncResult};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Operations the reconciler needs from a calendar store.
///
/// Events are identified only by (summary, start, end) within a calendar.
#[async_trait]
pub trait CalendarBackend: Send + Sync {
    /// Names of all calendars, in the backend's order
    async fn list_calendar_names(&self) -> SyncResult<Vec<String>>;

    /// Whether at least one event matches the triple
    async fn find_event(
        &self,
        calendar: &str,
        summary: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> SyncResult<bool>;

    /// Create an event, with a sound alarm `alert_minutes` before start if given
    async fn create_event(
        &self,
        calendar: &str,
        summary: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
        alert_minutes: Option<u32>,
    ) -> SyncResult<()>;

    /// Delete every event matching the triple
    async fn delete_event(
        &self,
        calendar: &str,
        summary: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> SyncResult<()>;
}

/// Which backend implementation to run against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// macOS Calendar through osascript
    #[default]
    AppleScript,
    /// In-process store, nothing leaves the process
    Memory,
}

impl FromStr for BackendKind {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "applescript" => Ok(BackendKind::AppleScript),
            "memory" => Ok(BackendKind::Memory),
            other => Err(config_error(&format!("Unknown calendar backend: {}", other))),
        }
    }
}

impl BackendKind {
    /// Build the backend this kind names
    pub fn build(self) -> Arc<dyn CalendarBackend> {
        match self {
            BackendKind::AppleScript => Arc::new(AppleScriptBackend::new()),
            BackendKind::Memory => Arc::new(MemoryBackend::new()),
        }
    }
}
