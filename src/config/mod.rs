//! Configuration model for destyle.
//!
//! This module defines the Config struct that represents `destyle.yaml` at the
//! project root. It supports forward-compatible YAML parsing (unknown fields are
//! ignored), sensible defaults for every field, and validation of values.

mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::Config;
pub use types::CONFIG_FILE_NAME;
