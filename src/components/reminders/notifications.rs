use notify_rust::Notification;
use tracing::{error, info, warn};

/// App name shown on desktop notifications
const APP_NAME: &str = "Reminder Sync";

/// Where user-facing results of a sync run are reported
pub trait Notifier: Send + Sync {
    /// Report a successful calendar change
    fn notify_success(&self, message: &str);

    /// Report a failure
    fn notify_error(&self, message: &str);
}

/// Reports through the tracing log only
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify_success(&self, message: &str) {
        info!("{}", message);
    }

    fn notify_error(&self, message: &str) {
        error!("{}", message);
    }
}

/// Logs and raises an OS notification
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    fn show(summary: &'static str, body: &str) {
        let body = body.to_string();
        // D-Bus / NSUserNotification calls can block, keep them off the runtime
        std::thread::spawn(move || {
            if let Err(e) = Notification::new()
                .summary(summary)
                .body(&body)
                .appname(APP_NAME)
                .show()
            {
                warn!("Failed to show desktop notification: {}", e);
            }
        });
    }
}

impl Notifier for DesktopNotifier {
    fn notify_success(&self, message: &str) {
        info!("{}", message);
        Self::show(APP_NAME, message);
    }

    fn notify_error(&self, message: &str) {
        error!("{}", message);
        Self::show("Reminder Sync error", message);
    }
}

/// Message for a created event
pub fn created_message(title: &str) -> String {
    format!("Created calendar event: {}", title)
}

/// Message for a deleted event
pub fn deleted_message(title: &str) -> String {
    format!("Deleted calendar event: {}", title)
}

/// Message for a failed backend call
pub fn backend_failure_message(error: &impl std::fmt::Display) -> String {
    format!("Calendar operation failed: {}", error)
}

/// Message for a document that could not be processed
pub fn file_failure_message(error: &impl std::fmt::Display) -> String {
    format!("Failed to process file: {}", error)
}
