use crate::components::BackendKind;
use crate::error::{config_error, env_error, SyncResult};
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Config file read when `REMINDER_CONFIG` is not set
pub const DEFAULT_CONFIG_FILE: &str = "config/reminder_sync.toml";

/// Default debounce window for file change events
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Main configuration structure for the sync service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Absolute path of the document holding the annotations
    pub target_file: PathBuf,
    /// Directory relative target paths are resolved against
    pub workspace_root: PathBuf,
    /// Calendar backend to drive
    pub backend: BackendKind,
    /// Raise OS notifications in addition to logging
    pub desktop_notifications: bool,
    /// Quiet period before a burst of change events triggers a run
    pub debounce_ms: u64,
    /// Process the document once at startup, before any change
    pub sync_on_start: bool,
}

/// Optional settings read from the TOML config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub target_file: Option<PathBuf>,
    pub workspace_root: Option<PathBuf>,
    pub backend: Option<BackendKind>,
    pub desktop_notifications: Option<bool>,
    pub debounce_ms: Option<u64>,
    pub sync_on_start: Option<bool>,
}

impl FileConfig {
    /// Parse a TOML document
    pub fn from_toml(content: &str) -> SyncResult<Self> {
        Ok(toml::from_str(content)?)
    }
}

impl Config {
    /// Load configuration from `.env`, the config file and the environment
    pub fn load() -> SyncResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let config_path = env::var("REMINDER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let file = match fs::read_to_string(&config_path) {
            Ok(content) => FileConfig::from_toml(&content)?,
            Err(_) => FileConfig::default(),
        };

        let cwd = env::current_dir()?;
        let config = Self::from_sources(file, |key| env::var(key).ok(), &cwd)?;
        config.ensure_target_exists()?;
        Ok(config)
    }

    /// Merge file settings with variables from `lookup`, the latter winning
    pub fn from_sources(
        file: FileConfig,
        lookup: impl Fn(&str) -> Option<String>,
        cwd: &Path,
    ) -> SyncResult<Self> {
        let workspace_root = lookup("REMINDER_WORKSPACE")
            .map(PathBuf::from)
            .or(file.workspace_root)
            .unwrap_or_else(|| cwd.to_path_buf());
        let workspace_root = if workspace_root.is_absolute() {
            workspace_root
        } else {
            cwd.join(workspace_root)
        };

        let target = lookup("REMINDER_TARGET_FILE")
            .map(PathBuf::from)
            .or(file.target_file)
            .ok_or_else(|| config_error("No target file configured"))?;
        let target_file = workspace_root.join(target);

        let backend = match lookup("REMINDER_BACKEND") {
            Some(value) => BackendKind::from_str(&value)?,
            None => file.backend.unwrap_or_default(),
        };

        let desktop_notifications = match lookup("REMINDER_DESKTOP_NOTIFICATIONS") {
            Some(value) => parse_bool("REMINDER_DESKTOP_NOTIFICATIONS", &value)?,
            None => file.desktop_notifications.unwrap_or(true),
        };

        let debounce_ms = match lookup("REMINDER_DEBOUNCE_MS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| env_error("Invalid REMINDER_DEBOUNCE_MS format"))?,
            None => file.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS),
        };

        let sync_on_start = match lookup("REMINDER_SYNC_ON_START") {
            Some(value) => parse_bool("REMINDER_SYNC_ON_START", &value)?,
            None => file.sync_on_start.unwrap_or(false),
        };

        Ok(Config {
            target_file,
            workspace_root,
            backend,
            desktop_notifications,
            debounce_ms,
            sync_on_start,
        })
    }

    /// Refuse to start without an existing document to watch
    pub fn ensure_target_exists(&self) -> SyncResult<()> {
        if !self.target_file.is_file() {
            return Err(config_error(&format!(
                "Target file does not exist: {}",
                self.target_file.display()
            )));
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> SyncResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(env_error(&format!("Invalid {} format", key))),
    }
}
