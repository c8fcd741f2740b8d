// src/fsutil.rs

//! Atomic file writes for generated package files

use crate::error::{Error, Result};
use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Write `contents` to `path` with permissions `mode`
///
/// Data goes to a temporary file in the same directory which is renamed
/// into place, so a failed write never leaves a partial file behind. A
/// failure to apply `mode` after the rename is only logged.
pub fn write_file(path: &Path, contents: &[u8], mode: u32) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|e| Error::IoError(format!("Failed to create temp file in {}: {}", dir.display(), e)))?;
    tmp.write_all(contents)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| Error::IoError(format!("Failed to write {}: {}", path.display(), e)))?;
    tmp.persist(path)
        .map_err(|e| Error::IoError(format!("Failed to move {} into place: {}", path.display(), e.error)))?;

    if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(mode)) {
        warn!("Could not set mode {:o} on {}: {}", mode, path.display(), e);
    }

    debug!("Wrote {} ({} bytes)", path.display(), contents.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_file_sets_mode() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doinst.sh");

        write_file(&path, b"ldconfig\n", 0o755).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "ldconfig\n");
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn test_write_file_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("slack-desc");
        fs::write(&path, "old").unwrap();

        write_file(&path, b"new", 0o644).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_file_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing/slack-desc");
        assert!(matches!(write_file(&path, b"x", 0o644), Err(Error::IoError(_))));
    }
}
