//! Filesystem utilities for destyle.
//!
//! Every write the tool performs goes through [`atomic_write`], so an
//! interrupted run never leaves a half-written document or stylesheet.

pub mod atomic;
pub mod backup;

pub use atomic::{atomic_write, atomic_write_file};
pub use backup::{backup_path, ensure_backup};
