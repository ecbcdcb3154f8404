//! Filesystem helpers shared by the seeder and the backup manager
//!
//! - Merge-copy of a directory tree into an existing destination
//! - Flat copy of the regular files of one directory
//! - Lexical path nesting checks

use std::fs;
use std::path::{Component, Path, PathBuf};

use filetime::FileTime;
use tracing::trace;
use walkdir::WalkDir;

use crate::error::{SeederError, SeederResult};

/// Recursively copy the contents of `src` into `dest`
///
/// Missing directories are created. Files that already exist at the
/// destination are overwritten; other destination entries are left alone.
/// Returns the number of files copied.
pub fn copy_tree_merge(src: &Path, dest: &Path) -> SeederResult<usize> {
    fs::create_dir_all(dest).map_err(|e| SeederError::copy(src, dest, e.to_string()))?;

    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1).follow_links(false) {
        let entry = entry.map_err(|e| SeederError::copy(src, dest, e.to_string()))?;
        let rel_path = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| SeederError::copy(src, dest, e.to_string()))?;
        let target = dest.join(rel_path);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| SeederError::copy(entry.path(), &target, e.to_string()))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| SeederError::copy(entry.path(), &target, e.to_string()))?;
            }
            copy_file_with_metadata(entry.path(), &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Copy every regular file directly under `src` into `dest`
///
/// Subdirectories are skipped. Returns the copied destination paths.
pub fn copy_files_flat(src: &Path, dest: &Path) -> SeederResult<Vec<PathBuf>> {
    let mut copied = Vec::new();

    for entry in fs::read_dir(src).map_err(|e| {
        SeederError::Io(format!("Failed to read directory {}: {}", src.display(), e))
    })? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let target = dest.join(entry.file_name());
        copy_file_with_metadata(&entry.path(), &target)?;
        copied.push(target);
    }

    copied.sort();
    Ok(copied)
}

/// Copy one file, carrying over its permissions and modification time
///
/// An existing destination file is replaced, even when it is read-only.
pub fn copy_file_with_metadata(src: &Path, dest: &Path) -> SeederResult<()> {
    trace!("copy {} -> {}", src.display(), dest.display());

    if dest.is_file() {
        fs::remove_file(dest).map_err(|e| SeederError::copy(src, dest, e.to_string()))?;
    }
    fs::copy(src, dest).map_err(|e| SeederError::copy(src, dest, e.to_string()))?;

    // Path-based, so a read-only copy needs no write access here
    let metadata = fs::metadata(src)?;
    filetime::set_file_mtime(dest, FileTime::from_last_modification_time(&metadata))
        .map_err(|e| SeederError::copy(src, dest, e.to_string()))?;

    Ok(())
}

/// Lexically normalize a path, resolving `.` and `..` without touching disk
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }

    normalized
}

/// True when `path` equals `base` or lies underneath it
pub fn is_nested_under(path: &Path, base: &Path) -> bool {
    normalize_lexically(path).starts_with(normalize_lexically(base))
}
