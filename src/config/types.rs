//! Configuration constants and defaults for destyle.

use crate::engine::{DEFAULT_BLOCK_COMMENT, DEFAULT_CLASS_PREFIX};

/// Name of the config file looked up at the project root.
pub const CONFIG_FILE_NAME: &str = "destyle.yaml";

/// Default glob patterns selecting markup documents.
pub fn default_include() -> Vec<String> {
    vec!["**/*.html".to_string()]
}

/// Default glob patterns removed from the selection.
pub fn default_exclude() -> Vec<String> {
    vec![
        "**/*.bak".to_string(),
        "**/node_modules/**".to_string(),
        "**/.git/**".to_string(),
    ]
}

// Default value functions for serde
pub(crate) fn default_stylesheet() -> String {
    "css/styles.css".to_string()
}
pub(crate) fn default_class_prefix() -> String {
    DEFAULT_CLASS_PREFIX.to_string()
}
pub(crate) fn default_block_comment() -> String {
    DEFAULT_BLOCK_COMMENT.to_string()
}
pub(crate) fn default_backup_suffix() -> String {
    "bak".to_string()
}
pub(crate) fn default_true() -> bool {
    true
}
