//! Run lock for a stylesheet.
//!
//! Class allocation and the final stylesheet write must not interleave
//! between two runs, otherwise both could append the same generated rules.
//! A run therefore holds `<stylesheet>.lock` while it writes.
//!
//! The lock file is created with **create_new** semantics (exclusive create)
//! and contains JSON metadata:
//! - `owner`: `user@HOST`
//! - `pid`: process id
//! - `created_at`: RFC3339 timestamp
//! - `action`: the command holding the lock
//!
//! The lock is released when its [`LockGuard`] is dropped. If deletion fails
//! during drop a warning is printed and the program carries on.

use crate::error::{DestyleError, Result};
use crate::events::actor_string;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Lock metadata stored in lock files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockMetadata {
    /// Owner of the lock (e.g., `user@HOST`).
    pub owner: String,

    /// Process ID of the lock holder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,

    /// Timestamp when the lock was created (RFC3339).
    pub created_at: DateTime<Utc>,

    /// The command holding the lock.
    pub action: String,
}

impl LockMetadata {
    /// Create new lock metadata with the current timestamp.
    pub fn new(action: &str) -> Self {
        Self {
            owner: actor_string(),
            pid: Some(std::process::id()),
            created_at: Utc::now(),
            action: action.to_string(),
        }
    }

    /// Parse lock metadata from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| DestyleError::io("read lock file", path, e))?;

        serde_json::from_str(&content).map_err(|e| {
            DestyleError::LockError(format!(
                "failed to parse lock file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Serialize lock metadata to JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            DestyleError::LockError(format!("failed to serialize lock metadata: {}", e))
        })
    }

    /// Calculate the age of the lock.
    pub fn age(&self) -> Duration {
        Utc::now().signed_duration_since(self.created_at)
    }

    /// Format the age as a human-readable string.
    pub fn age_string(&self) -> String {
        let age = self.age();
        let minutes = age.num_minutes();
        let hours = age.num_hours();
        let days = age.num_days();

        if days > 0 {
            format!("{}d {}h", days, hours % 24)
        } else if hours > 0 {
            format!("{}h {}m", hours, minutes % 60)
        } else {
            format!("{}m", minutes)
        }
    }
}

/// RAII guard for a lock file.
#[derive(Debug)]
pub struct LockGuard {
    path: PathBuf,
}

impl LockGuard {
    /// Get the path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            eprintln!(
                "Warning: failed to release lock '{}': {}",
                self.path.display(),
                e
            );
        }
    }
}

/// Lock file path guarding `stylesheet`.
pub fn lock_path_for(stylesheet: &Path) -> PathBuf {
    let mut name = stylesheet.as_os_str().to_os_string();
    name.push(".lock");
    PathBuf::from(name)
}

/// Acquire the run lock for `stylesheet`.
///
/// # Returns
///
/// * `Ok(LockGuard)` - Lock held until the guard is dropped
/// * `Err(DestyleError::LockError)` - Another run holds the lock (exit code 4)
pub fn acquire_stylesheet_lock(stylesheet: &Path, action: &str) -> Result<LockGuard> {
    let lock_path = lock_path_for(stylesheet);
    let metadata = LockMetadata::new(action);

    if let Some(parent) = lock_path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| DestyleError::io("create directory", parent, e))?;
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&lock_path)
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                let existing_info = match LockMetadata::from_file(&lock_path) {
                    Ok(meta) => format!(
                        "\nLock: {} (created {} ago by {}, pid {})\nAction: {}",
                        lock_path.display(),
                        meta.age_string(),
                        meta.owner,
                        meta.pid
                            .map(|p| p.to_string())
                            .unwrap_or_else(|| "unknown".to_string()),
                        meta.action
                    ),
                    Err(_) => format!("\nLock: {}", lock_path.display()),
                };
                DestyleError::LockError(format!(
                    "stylesheet is locked by another run{}\n\
                     If no other run is active, delete the lock file and retry.",
                    existing_info
                ))
            } else {
                DestyleError::LockError(format!(
                    "failed to acquire lock '{}': {}",
                    lock_path.display(),
                    e
                ))
            }
        })?;

    let json = metadata.to_json()?;
    if let Err(e) = file.write_all(json.as_bytes()).and_then(|()| file.sync_all()) {
        let _ = fs::remove_file(&lock_path);
        return Err(DestyleError::LockError(format!(
            "failed to write lock metadata: {}",
            e
        )));
    }

    Ok(LockGuard { path: lock_path })
}
