use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Alert offset used when an annotation carries no `!N` marker
pub const DEFAULT_ALERT_MINUTES: u32 = 30;

/// One parsed `@reminder:` annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRecord {
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    /// Only ever set together with `start_time`
    pub end_time: Option<NaiveTime>,
    pub title: String,
    pub alert_minutes: u32,
    pub should_delete: bool,
}

impl ReminderRecord {
    /// Alarm offset to hand to the backend, `None` when alerts are disabled
    pub fn alarm(&self) -> Option<u32> {
        (self.alert_minutes > 0).then_some(self.alert_minutes)
    }
}

/// Absolute local start and end of the event a record maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// What the reconciler did with a single record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Start already passed, nothing was touched
    Expired,
    /// A matching event was created
    Created,
    /// A matching event already existed
    AlreadyExists,
    /// Matching events were removed
    Deleted,
    /// Delete requested but no matching event exists
    NothingToDelete,
}

/// Result of one processing run over a document
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Per record, in document order: the title and its outcome or failure message
    pub entries: Vec<(String, Result<ReconcileOutcome, String>)>,
}

impl SyncReport {
    /// Number of records that failed against the backend
    pub fn failures(&self) -> usize {
        self.entries.iter().filter(|(_, r)| r.is_err()).count()
    }

    /// Count records that ended with the given outcome
    pub fn count(&self, outcome: &ReconcileOutcome) -> usize {
        self.entries
            .iter()
            .filter(|(_, r)| r.as_ref().is_ok_and(|o| o == outcome))
            .count()
    }
}
