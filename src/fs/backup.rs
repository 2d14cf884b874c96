//! Backups of documents before their first destructive write.

use crate::error::{DestyleError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Path of the backup copy for `path`, e.g. `index.html.bak`.
pub fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// Copy `path` to its backup location unless a backup already exists.
///
/// An existing backup is left alone so that it keeps the state from before
/// the first run. Returns the backup path when a new copy was made.
pub fn ensure_backup(path: &Path, suffix: &str) -> Result<Option<PathBuf>> {
    let backup = backup_path(path, suffix);
    if backup.exists() {
        return Ok(None);
    }

    fs::copy(path, &backup).map_err(|e| DestyleError::io("back up", path, e))?;
    Ok(Some(backup))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("site/index.html"), "bak"),
            Path::new("site/index.html.bak")
        );
    }

    #[test]
    fn test_first_backup_copies_content() {
        let temp_dir = TempDir::new().unwrap();
        let page = temp_dir.path().join("index.html");
        fs::write(&page, "original").unwrap();

        let made = ensure_backup(&page, "bak").unwrap();

        assert_eq!(made, Some(temp_dir.path().join("index.html.bak")));
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("index.html.bak")).unwrap(),
            "original"
        );
    }

    #[test]
    fn test_existing_backup_is_preserved() {
        let temp_dir = TempDir::new().unwrap();
        let page = temp_dir.path().join("index.html");
        fs::write(&page, "second version").unwrap();
        fs::write(temp_dir.path().join("index.html.bak"), "first version").unwrap();

        let made = ensure_backup(&page, "bak").unwrap();

        assert!(made.is_none());
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("index.html.bak")).unwrap(),
            "first version"
        );
    }

    #[test]
    fn test_missing_source_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = ensure_backup(&temp_dir.path().join("missing.html"), "bak").unwrap_err();
        assert!(matches!(err, DestyleError::IoError(_)));
    }
}
