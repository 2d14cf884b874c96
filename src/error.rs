//! Error types for the destyle CLI.
//!
//! Fatal errors abort the whole run before anything is written. Problems with a
//! single attribute are not errors; see [`crate::engine::ScanWarning`].

use crate::exit_codes;
use std::path::Path;
use thiserror::Error;

/// Main error type for destyle operations.
#[derive(Error, Debug)]
pub enum DestyleError {
    /// User provided invalid arguments or configuration.
    #[error("{0}")]
    UserError(String),

    /// Two distinct normalized declarations map to the same class id.
    #[error(
        "class id collision on '{class_id}'{}: '{existing}' is already registered, refusing to merge '{incoming}'",
        source_suffix(.source_name)
    )]
    HashCollision {
        class_id: String,
        existing: String,
        incoming: String,
        source_name: Option<String>,
    },

    /// A document or stylesheet could not be read or written.
    #[error("I/O failure: {0}")]
    IoError(String),

    /// The stylesheet lock could not be acquired.
    #[error("Lock acquisition failed: {0}")]
    LockError(String),
}

fn source_suffix(source_name: &Option<String>) -> String {
    source_name
        .as_ref()
        .map(|name| format!(" in {}", name))
        .unwrap_or_default()
}

impl DestyleError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            DestyleError::UserError(_) => exit_codes::USER_ERROR,
            DestyleError::HashCollision { .. } => exit_codes::HASH_COLLISION,
            DestyleError::IoError(_) => exit_codes::IO_FAILURE,
            DestyleError::LockError(_) => exit_codes::LOCK_FAILURE,
        }
    }

    /// Build an I/O error naming the file and the operation that failed.
    pub fn io(action: &str, path: &Path, err: std::io::Error) -> Self {
        DestyleError::IoError(format!("failed to {} '{}': {}", action, path.display(), err))
    }

    /// Attach the name of the document being processed to a collision error.
    pub fn in_source(self, name: impl Into<String>) -> Self {
        match self {
            DestyleError::HashCollision {
                class_id,
                existing,
                incoming,
                source_name: None,
            } => DestyleError::HashCollision {
                class_id,
                existing,
                incoming,
                source_name: Some(name.into()),
            },
            other => other,
        }
    }
}

/// Result type alias for destyle operations.
pub type Result<T> = std::result::Result<T, DestyleError>;
