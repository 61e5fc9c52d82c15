use super::CalendarBackend;
use crate::error::{backend_error, SyncResult};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Name of the calendar a fresh memory backend starts with
pub const DEFAULT_CALENDAR: &str = "Calendar";

/// Event held by the memory backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEvent {
    pub summary: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub alert_minutes: Option<u32>,
}

impl StoredEvent {
    fn matches(&self, summary: &str, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.summary == summary && self.start == start && self.end == end
    }
}

/// Calendar store kept in process memory, used for dry runs.
///
/// Cloning shares the same underlying store.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    // Vec keeps calendar order stable, the first entry is the default target
    calendars: Arc<RwLock<Vec<(String, Vec<StoredEvent>)>>>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    /// Create a store with a single empty calendar
    pub fn new() -> Self {
        Self::with_calendars(&[DEFAULT_CALENDAR])
    }

    /// Create a store with the given calendars, in order
    pub fn with_calendars(names: &[&str]) -> Self {
        let calendars = names
            .iter()
            .map(|name| (name.to_string(), Vec::new()))
            .collect();
        Self {
            calendars: Arc::new(RwLock::new(calendars)),
        }
    }

    /// Snapshot of every event, keyed by calendar name
    pub async fn events(&self) -> BTreeMap<String, Vec<StoredEvent>> {
        self.calendars.read().await.iter().cloned().collect()
    }

    /// Snapshot of the events in one calendar
    pub async fn events_in(&self, calendar: &str) -> Vec<StoredEvent> {
        self.calendars
            .read()
            .await
            .iter()
            .find(|(name, _)| name == calendar)
            .map(|(_, events)| events.clone())
            .unwrap_or_default()
    }
}

fn unknown_calendar(calendar: &str) -> crate::error::Error {
    backend_error(&format!("Calendar not found: {}", calendar))
}

#[async_trait]
impl CalendarBackend for MemoryBackend {
    async fn list_calendar_names(&self) -> SyncResult<Vec<String>> {
        Ok(self
            .calendars
            .read()
            .await
            .iter()
            .map(|(name, _)| name.clone())
            .collect())
    }

    async fn find_event(
        &self,
        calendar: &str,
        summary: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> SyncResult<bool> {
        let calendars = self.calendars.read().await;
        let (_, events) = calendars
            .iter()
            .find(|(name, _)| name == calendar)
            .ok_or_else(|| unknown_calendar(calendar))?;
        Ok(events.iter().any(|e| e.matches(summary, start, end)))
    }

    async fn create_event(
        &self,
        calendar: &str,
        summary: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
        alert_minutes: Option<u32>,
    ) -> SyncResult<()> {
        let mut calendars = self.calendars.write().await;
        let (_, events) = calendars
            .iter_mut()
            .find(|(name, _)| name == calendar)
            .ok_or_else(|| unknown_calendar(calendar))?;

        info!("[memory] {}: create '{}' {} - {}", calendar, summary, start, end);
        events.push(StoredEvent {
            summary: summary.to_string(),
            start,
            end,
            alert_minutes,
        });
        Ok(())
    }

    async fn delete_event(
        &self,
        calendar: &str,
        summary: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> SyncResult<()> {
        let mut calendars = self.calendars.write().await;
        let (_, events) = calendars
            .iter_mut()
            .find(|(name, _)| name == calendar)
            .ok_or_else(|| unknown_calendar(calendar))?;

        let before = events.len();
        events.retain(|e| !e.matches(summary, start, end));
        info!(
            "[memory] {}: deleted {} event(s) '{}' {} - {}",
            calendar,
            before - events.len(),
            summary,
            start,
            end
        );
        Ok(())
    }
}
