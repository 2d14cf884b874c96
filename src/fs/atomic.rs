//! Atomic file replacement.
//!
//! Documents and the stylesheet are written all-or-nothing:
//! 1. Write the new content to a temporary file next to the target
//! 2. Sync the file to disk (fsync)
//! 3. Rename it over the target
//!
//! `std::fs::rename` replaces an existing destination on both POSIX
//! (`rename(2)`) and Windows (`MoveFileExW` with `MOVEFILE_REPLACE_EXISTING`).
//! The rename is only atomic when source and destination share a filesystem,
//! which is why the temporary file lives in the target's directory. After a
//! crash a stray `.{filename}.destyle.tmp` may remain; the target itself is
//! either the old or the new content.

use crate::error::{DestyleError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically replace `path` with `content`.
///
/// Missing parent directories are created.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| DestyleError::io("create directory", parent, e))?;
    }

    let temp_path = temp_path_for(path)?;
    write_and_sync(&temp_path, content)?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        DestyleError::io("replace", path, e)
    })?;

    sync_parent_dir(path);
    Ok(())
}

/// Persist the directory entry of a freshly renamed file.
#[cfg(unix)]
fn sync_parent_dir(path: &Path) {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if let Ok(dir) = File::open(parent) {
        let _ = dir.sync_all();
    }
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) {}

/// Atomically replace `path` with a string.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Temporary file path in the same directory as the target.
fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            DestyleError::UserError(format!("invalid file path '{}'", target.display()))
        })?;

    Ok(parent.join(format!(".{}.destyle.tmp", filename)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| DestyleError::io("create", path, e))?;

    let written = file.write_all(content).and_then(|()| file.sync_all());
    if let Err(e) = written {
        let _ = fs::remove_file(path);
        return Err(DestyleError::io("write", path, e));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("page.html");

        atomic_write(&file_path, b"<p>hi</p>").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "<p>hi</p>");
    }

    #[test]
    fn test_atomic_write_replace_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("page.html");
        fs::write(&file_path, "<p style=\"a:1\">hi</p>").unwrap();

        atomic_write_file(&file_path, "<p class=\"x\">hi</p>").unwrap();

        assert_eq!(
            fs::read_to_string(&file_path).unwrap(),
            "<p class=\"x\">hi</p>"
        );
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("css").join("generated").join("a.css");

        atomic_write_file(&file_path, ".a { b:c; }\n").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), ".a { b:c; }\n");
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("styles.css");

        atomic_write(&file_path, b"content").unwrap();

        assert!(!temp_dir.path().join(".styles.css.destyle.tmp").exists());
        let entries = fs::read_dir(temp_dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_atomic_write_empty_content() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("empty.css");

        atomic_write(&file_path, b"").unwrap();

        assert!(fs::read(&file_path).unwrap().is_empty());
    }

    #[test]
    fn test_atomic_write_into_missing_parent_that_is_a_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();

        let err = atomic_write(blocker.join("page.html"), b"x").unwrap_err();
        assert!(matches!(err, DestyleError::IoError(_)));
    }

    #[test]
    fn test_temp_path_is_hidden_sibling() {
        let temp = temp_path_for(Path::new("/site/pages/index.html")).unwrap();
        assert_eq!(temp, Path::new("/site/pages/.index.html.destyle.tmp"));
    }
}
