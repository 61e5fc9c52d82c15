// Export components
pub mod calendar_backend;
pub mod reminders;

// Re-export the backend boundary
pub use calendar_backend::{BackendKind, CalendarBackend};
// Re-export the sync service handle
pub use reminders::SyncHandle;
