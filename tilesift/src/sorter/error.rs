//! Errors that abort a sorting run.

use std::path::PathBuf;

use thiserror::Error;

use crate::inventory::InventoryError;
use crate::selection::SelectionError;

/// Fatal pipeline errors.
///
/// Everything here is raised before the target directory is touched, except
/// [`SortError::TargetReset`]. Per-file copy failures are not errors; they
/// are recorded in the run report and the run continues.
#[derive(Debug, Error)]
pub enum SortError {
    /// Reading the selection table failed.
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Snapshotting the source directory failed.
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// Source and target are the same directory. Resetting the target would
    /// delete the source files before any could be copied.
    #[error("source and target are the same directory: {dir}")]
    SameDirectory { dir: PathBuf },

    /// The target directory contains the source directory. Resetting the
    /// target would delete the source files inside it.
    #[error("target directory {target_dir} contains the source directory {source_dir}")]
    TargetContainsSource { source_dir: PathBuf, target_dir: PathBuf },

    /// Deleting or recreating the target directory failed.
    #[error("failed to reset target directory {dir}: {source}")]
    TargetReset { dir: PathBuf, source: std::io::Error },
}
