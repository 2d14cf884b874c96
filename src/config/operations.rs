//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::error::{DestyleError, Result};
use globset::Glob;
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(DestyleError::UserError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            DestyleError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load config from `path` if it exists, otherwise use defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not a mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| DestyleError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            DestyleError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `class_prefix` must be a usable start of a CSS class name
    /// - `include` must not be empty and every glob must compile
    /// - `backup_suffix` must be non-empty and have no leading dot
    /// - `block_comment` must not close the CSS comment early
    pub fn validate(&self) -> Result<()> {
        if !is_valid_class_prefix(&self.class_prefix) {
            return Err(DestyleError::UserError(format!(
                "config validation failed: class_prefix '{}' is not a valid CSS class name start \
                 (use letters, digits, '-' or '_', not starting with a digit)",
                self.class_prefix
            )));
        }

        if self.include.is_empty() {
            return Err(DestyleError::UserError(
                "config validation failed: include must list at least one glob".to_string(),
            ));
        }

        for (key, patterns) in [("include", &self.include), ("exclude", &self.exclude)] {
            for pattern in patterns {
                Glob::new(pattern).map_err(|e| {
                    DestyleError::UserError(format!(
                        "config validation failed: invalid glob in {}: '{}' - {}",
                        key, pattern, e
                    ))
                })?;
            }
        }

        if self.backup_suffix.is_empty() {
            return Err(DestyleError::UserError(
                "config validation failed: backup_suffix must be non-empty".to_string(),
            ));
        }
        if self.backup_suffix.starts_with('.') {
            return Err(DestyleError::UserError(format!(
                "config validation failed: backup_suffix must not have a leading dot (found '{}'). Use '{}' instead.",
                self.backup_suffix,
                self.backup_suffix.trim_start_matches('.')
            )));
        }

        if self.block_comment.contains("*/") {
            return Err(DestyleError::UserError(
                "config validation failed: block_comment must not contain '*/'".to_string(),
            ));
        }

        Ok(())
    }
}

fn is_valid_class_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '-' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
