use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Calendar backend error: {0}")]
    #[diagnostic(code(reminder_sync::backend))]
    Backend(String),

    #[error("Failed to read {}: {source}", .path.display())]
    #[diagnostic(code(reminder_sync::file_read))]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Environment error: {0}")]
    #[diagnostic(code(reminder_sync::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(reminder_sync::config),
        help("check config/reminder_sync.toml and the REMINDER_* environment variables")
    )]
    Config(String),

    #[error("File watcher error: {0}")]
    #[diagnostic(code(reminder_sync::watcher))]
    Watcher(String),

    #[error(transparent)]
    #[diagnostic(code(reminder_sync::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(reminder_sync::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(reminder_sync::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<notify::Error> for Error {
    fn from(err: notify::Error) -> Self {
        Error::Watcher(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type SyncResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(message: &str) -> Error {
    Error::Environment(message.to_string())
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create calendar backend errors
pub fn backend_error(message: &str) -> Error {
    Error::Backend(message.to_string())
}

/// Helper to create file watcher errors
pub fn watcher_error(message: &str) -> Error {
    Error::Watcher(message.to_string())
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
