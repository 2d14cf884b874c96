//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for a destyle project.
///
/// This struct represents the contents of `destyle.yaml`.
/// Unknown fields in the YAML are kept in `extra` and otherwise ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Inputs
    // =========================================================================
    /// Stylesheet receiving generated rules, relative to the project root.
    #[serde(default = "default_stylesheet")]
    pub stylesheet: String,

    /// Globs selecting documents when a directory is scanned.
    #[serde(default = "default_include")]
    pub include: Vec<String>,

    /// Globs removed from the selection.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    // =========================================================================
    // Generated classes
    // =========================================================================
    /// Prefix of generated class names. Changing it orphans rules written by
    /// earlier runs.
    #[serde(default = "default_class_prefix")]
    pub class_prefix: String,

    /// Text of the comment written above each block of generated rules.
    #[serde(default = "default_block_comment")]
    pub block_comment: String,

    // =========================================================================
    // Safety
    // =========================================================================
    /// Copy each document to `<file>.<backup_suffix>` before its first rewrite.
    #[serde(default = "default_true")]
    pub backup: bool,

    /// Extension appended to backup copies (no leading dot).
    #[serde(default = "default_backup_suffix")]
    pub backup_suffix: String,

    // =========================================================================
    // Logging
    // =========================================================================
    /// NDJSON file receiving one event per run, relative to the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_log: Option<String>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stylesheet: default_stylesheet(),
            include: default_include(),
            exclude: default_exclude(),
            class_prefix: default_class_prefix(),
            block_comment: default_block_comment(),
            backup: default_true(),
            backup_suffix: default_backup_suffix(),
            events_log: None,
            extra: BTreeMap::new(),
        }
    }
}
