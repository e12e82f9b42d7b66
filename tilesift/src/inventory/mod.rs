//! Source directory snapshot.
//!
//! The pipeline matches patterns against a single listing of the source
//! directory taken at run start; files created or removed afterwards are not
//! observed. Only regular files participate: tiles live flat in the source
//! directory and subdirectories are never copy candidates.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from snapshotting the source directory.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// The directory does not exist.
    #[error("source directory not found: {dir}")]
    NotFound { dir: PathBuf },

    /// The path exists but is not a directory.
    #[error("source path is not a directory: {dir}")]
    NotADirectory { dir: PathBuf },

    /// The directory contains no regular files. An empty source would make
    /// every selection silently copy nothing, so it is rejected up front.
    #[error("source directory contains no files: {dir}")]
    Empty { dir: PathBuf },

    /// Listing the directory failed.
    #[error("failed to read source directory {dir}: {source}")]
    Unreadable { dir: PathBuf, source: std::io::Error },
}

/// Sorted filenames of the regular files in the source directory.
#[derive(Debug, Clone)]
pub struct SourceInventory {
    dir: PathBuf,
    files: Vec<String>,
}

impl SourceInventory {
    /// Snapshot the regular files in `dir`.
    ///
    /// Filenames that are not valid UTF-8 cannot be matched against a
    /// pattern; they are logged and skipped rather than failing the scan.
    pub fn scan(dir: impl Into<PathBuf>) -> Result<Self, InventoryError> {
        let dir = dir.into();
        if !dir.exists() {
            return Err(InventoryError::NotFound { dir });
        }
        if !dir.is_dir() {
            return Err(InventoryError::NotADirectory { dir });
        }

        let entries = fs::read_dir(&dir).map_err(|e| InventoryError::Unreadable {
            dir: dir.clone(),
            source: e,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| InventoryError::Unreadable {
                dir: dir.clone(),
                source: e,
            })?;
            if !entry.path().is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => files.push(name),
                Err(name) => {
                    warn!(name = %name.to_string_lossy(), "skipping non-UTF-8 filename");
                }
            }
        }

        if files.is_empty() {
            return Err(InventoryError::Empty { dir });
        }

        files.sort();
        debug!(dir = %dir.display(), count = files.len(), "source directory scanned");
        Ok(Self { dir, files })
    }

    /// The scanned directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The snapshot filenames, sorted.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Number of files in the snapshot.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True when the snapshot holds no files. A successful scan never
    /// returns an empty snapshot, but the check keeps call sites honest.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Whether an exact filename is in the snapshot.
    pub fn contains(&self, name: &str) -> bool {
        self.files.binary_search_by(|f| f.as_str().cmp(name)).is_ok()
    }

    /// Filenames matching a compiled glob pattern, in sorted order.
    pub fn matching(&self, pattern: &Pattern) -> Vec<&str> {
        self.files
            .iter()
            .filter(|name| pattern.matches(name))
            .map(|name| name.as_str())
            .collect()
    }

    /// Full path of a snapshot filename.
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}
