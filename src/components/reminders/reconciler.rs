use super::models::{ReconcileOutcome, ReminderRecord, SyncReport};
use super::notifications::{backend_failure_message, created_message, deleted_message, Notifier};
use super::parser::parse_reminders;
use super::time::{event_window, is_expired};
use crate::components::calendar_backend::CalendarBackend;
use crate::error::{backend_error, SyncResult};
use chrono::{Local, NaiveDateTime};
use std::sync::Arc;
use tracing::{debug, info};

/// Source of the current local wall-clock time
pub type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Converges a calendar backend with parsed reminder records.
///
/// Holds no state between runs; the backend is the only source of truth for
/// whether an event exists.
#[derive(Clone)]
pub struct Reconciler {
    backend: Arc<dyn CalendarBackend>,
    notifier: Arc<dyn Notifier>,
    clock: Clock,
}

impl Reconciler {
    /// Create a reconciler using the local clock
    pub fn new(backend: Arc<dyn CalendarBackend>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            backend,
            notifier,
            clock: Arc::new(local_now),
        }
    }

    /// Replace the clock used for the expiry check
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> NaiveDateTime + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    /// Extract every annotation from `content` and reconcile them in order
    pub async fn process_text(&self, content: &str) -> SyncReport {
        let records = parse_reminders(content);
        debug!("Extracted {} reminder(s)", records.len());
        self.reconcile_all(&records).await
    }

    /// Reconcile records one after another.
    ///
    /// A backend failure is reported and recorded for that record only, the
    /// remaining records are still attempted.
    pub async fn reconcile_all(&self, records: &[ReminderRecord]) -> SyncReport {
        let mut report = SyncReport::default();

        for record in records {
            let result = match self.reconcile(record).await {
                Ok(outcome) => Ok(outcome),
                Err(e) => {
                    self.notifier.notify_error(&backend_failure_message(&e));
                    Err(e.to_string())
                }
            };
            report.entries.push((record.title.clone(), result));
        }

        report
    }

    /// Reconcile a single record against the backend
    pub async fn reconcile(&self, record: &ReminderRecord) -> SyncResult<ReconcileOutcome> {
        let window = event_window(record);

        // Past events are never touched, whatever the intent
        if is_expired(&window, (self.clock)()) {
            debug!("Skipping expired reminder '{}' at {}", record.title, window.start);
            return Ok(ReconcileOutcome::Expired);
        }

        let calendar = self.target_calendar().await?;
        let exists = self
            .backend
            .find_event(&calendar, &record.title, window.start, window.end)
            .await?;

        if record.should_delete {
            if !exists {
                debug!("Nothing to delete for '{}' at {}", record.title, window.start);
                return Ok(ReconcileOutcome::NothingToDelete);
            }

            self.backend
                .delete_event(&calendar, &record.title, window.start, window.end)
                .await?;
            info!("Deleted '{}' from calendar '{}'", record.title, calendar);
            self.notifier.notify_success(&deleted_message(&record.title));
            return Ok(ReconcileOutcome::Deleted);
        }

        if exists {
            debug!("Event '{}' at {} already exists", record.title, window.start);
            return Ok(ReconcileOutcome::AlreadyExists);
        }

        self.backend
            .create_event(
                &calendar,
                &record.title,
                window.start,
                window.end,
                record.alarm(),
            )
            .await?;
        info!(
            "Created '{}' in calendar '{}' ({} - {})",
            record.title, calendar, window.start, window.end
        );
        self.notifier.notify_success(&created_message(&record.title));

        Ok(ReconcileOutcome::Created)
    }

    /// The first calendar the backend lists
    async fn target_calendar(&self) -> SyncResult<String> {
        self.backend
            .list_calendar_names()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| backend_error("No calendars available"))
    }
}
