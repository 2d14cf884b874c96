//! Run event log for destyle.
//!
//! When a log file is configured (`events_log` in `destyle.yaml` or
//! `convert --log`), each completed run appends one JSON object per line
//! (NDJSON) with the fields:
//! - `ts`: RFC3339 timestamp
//! - `action`: the command (`convert`, `scan`)
//! - `actor`: the owner string (e.g., `user@HOST`)
//! - `details`: freeform object with run counts and touched files
//!
//! The log is only appended after every document and the stylesheet have
//! been written, so it never records a run that did not happen.

use crate::error::{DestyleError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Documents rewritten and rules appended
    Convert,
    /// Read-only inventory
    Scan,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::Convert => write!(f, "convert"),
            EventAction::Scan => write!(f, "scan"),
        }
    }
}

/// One line of the event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The action that was performed.
    pub action: EventAction,

    /// The actor who performed the action (e.g., `user@HOST`).
    pub actor: String,

    /// Freeform details object with action-specific information.
    pub details: Value,
}

impl Event {
    /// Create a new event stamped with the current time and actor.
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: actor_string(),
            details: Value::Object(serde_json::Map::new()),
        }
    }

    /// Set the details object for this event.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| DestyleError::UserError(format!("failed to serialize event: {}", e)))
    }
}

/// `USER@HOST` of the running process.
pub fn actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append `event` as one line to the log at `path`, creating it (and its
/// parent directory) if needed.
pub fn append_event(path: &Path, event: &Event) -> Result<()> {
    let json_line = event.to_ndjson_line()?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| DestyleError::io("create directory", parent, e))?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| DestyleError::io("open event log", path, e))?;

    writeln!(file, "{}", json_line).map_err(|e| DestyleError::io("write event to", path, e))?;
    file.sync_all()
        .map_err(|e| DestyleError::io("sync event log", path, e))?;

    Ok(())
}
