// src/manifest/walk.rs
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::error::{ManifestError, Result};

/// Order in which discovered files are handed to a builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOrder {
    /// Whatever order the directory walk produces.
    Walk,
    /// Lexicographic on the absolute path.
    SortedByPath,
}

/// `bam` -> `.bam`; already dotted extensions are returned unchanged.
pub fn normalize_extension(extension: &str) -> String {
    if extension.starts_with('.') {
        extension.to_string()
    } else {
        format!(".{extension}")
    }
}

/// Absolute form of `directory`, failing if it is missing or not a directory.
pub(crate) fn search_root(directory: &Path) -> Result<PathBuf> {
    if !directory.exists() {
        return Err(ManifestError::NotFound {
            path: directory.to_path_buf(),
            reason: "Directory not found",
        });
    }
    if !directory.is_dir() {
        return Err(ManifestError::NotFound {
            path: directory.to_path_buf(),
            reason: "Path is not a directory",
        });
    }
    std::path::absolute(directory).map_err(|e| ManifestError::io(directory, e))
}

/// Walk an absolute `root` recursively and collect every file whose name ends
/// with the (already normalised) `extension`.
pub(crate) fn walk_files(root: &Path, extension: &str, order: WalkOrder) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).into_iter() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("skipping unreadable entry below {}: {e}", root.display());
                continue;
            }
        };
        let p = entry.path();
        // raw bytes, names that are not valid UTF-8 still count
        let matches = p
            .file_name()
            .map(|n| n.as_encoded_bytes().ends_with(extension.as_bytes()))
            .unwrap_or(false);

        // is_file follows symlinks, so linked files are picked up as well
        if matches && p.is_file() {
            files.push(p.to_path_buf());
        }
    }

    if order == WalkOrder::SortedByPath {
        files.sort();
    }
    debug!("{} files ending on '{}' below {}", files.len(), extension, root.display());
    files
}

/// List all files carrying `extension` below `directory` as absolute paths.
pub fn list_sample_files<P: AsRef<Path>>(
    directory: P,
    extension: &str,
    order: WalkOrder,
) -> Result<Vec<PathBuf>> {
    let root = search_root(directory.as_ref())?;
    Ok(walk_files(&root, &normalize_extension(extension), order))
}
