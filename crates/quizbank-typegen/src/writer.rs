//! Atomic replacement of the generated file.
//!
//! The new contents go to a temporary file in the target's directory, which
//! is then renamed over the target. A concurrent reader (the frontend build
//! tool's own watcher) sees either the old file or the new one, never a
//! truncated one. When writing fails the previous file is left untouched.

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::WriteError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was created or replaced.
    Written,
    /// The file already held exactly these bytes; nothing was touched.
    Unchanged,
}

/// Replace `path` with `contents`.
///
/// Skipping identical content keeps the file's mtime stable, so an unchanged
/// regeneration does not trigger a frontend reload.
pub fn write_atomic(path: &Path, contents: &str) -> Result<WriteOutcome, WriteError> {
    if let Ok(existing) = fs::read(path) {
        if existing == contents.as_bytes() {
            debug!(path = %path.display(), "Generated types unchanged");
            return Ok(WriteOutcome::Unchanged);
        }
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|source| WriteError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let temp_error = |source: std::io::Error| WriteError::TempFile {
        path: path.to_path_buf(),
        source,
    };
    let mut temp = tempfile::Builder::new()
        .prefix(".typegen-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(temp_error)?;
    temp.write_all(contents.as_bytes()).map_err(temp_error)?;
    temp.as_file().sync_all().map_err(temp_error)?;

    // On failure the temp file is dropped and removed; the target is untouched.
    temp.persist(path).map_err(|e| WriteError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    debug!(path = %path.display(), bytes = contents.len(), "Generated types written");
    Ok(WriteOutcome::Written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frontend/src/types/generated.d.ts");

        let outcome = write_atomic(&path, "declare namespace App.Data {}\n").unwrap();

        assert_eq!(outcome, WriteOutcome::Written);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "declare namespace App.Data {}\n"
        );
    }

    #[test]
    fn test_identical_content_is_not_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generated.d.ts");

        assert_eq!(write_atomic(&path, "a").unwrap(), WriteOutcome::Written);
        assert_eq!(write_atomic(&path, "a").unwrap(), WriteOutcome::Unchanged);
        assert_eq!(write_atomic(&path, "b").unwrap(), WriteOutcome::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "b");
    }

    #[test]
    fn test_no_temp_files_are_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generated.d.ts");

        write_atomic(&path, "first").unwrap();
        write_atomic(&path, "second").unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("generated.d.ts")]);
    }

    #[test]
    fn test_failed_write_leaves_previous_file_intact() {
        let dir = tempfile::tempdir().unwrap();
        // A directory squatting on the target path makes the rename fail.
        let path = dir.path().join("generated.d.ts");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep.txt"), "previous").unwrap();

        let err = write_atomic(&path, "new contents").unwrap_err();

        assert!(matches!(err, WriteError::Persist { .. }));
        assert_eq!(fs::read_to_string(path.join("keep.txt")).unwrap(), "previous");
    }
}
