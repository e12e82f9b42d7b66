//! Tile selection and copy pipeline.
//!
//! A run reads the selection table, derives one filename pattern per tile
//! code, matches every pattern against a snapshot of the source directory,
//! resets the target directory and copies each match, then reports what
//! happened. All fatal validation comes before the destructive target reset:
//! a run that fails on inputs leaves an existing target untouched.

mod config;
mod error;
mod manifest;
mod report;

pub use config::SortConfig;
pub use error::SortError;
pub use manifest::{CopyEntry, CopyManifest};
pub use report::{CopyFailure, SortReport};

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};

use crate::inventory::SourceInventory;
use crate::selection;

/// Callback for sorting progress updates.
///
/// Receives the current stage, a 0.0 to 1.0 progress fraction within the
/// stage, and a status message.
pub type SortProgressCallback = Box<dyn Fn(SortStage, f64, &str) + Send + Sync>;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortStage {
    /// Reading the selection table.
    ReadingTable,
    /// Snapshotting the source directory.
    ScanningSource,
    /// Deriving patterns and matching them against the snapshot.
    Matching,
    /// Deleting and recreating the target directory.
    ResettingTarget,
    /// Copying matched files.
    Copying,
    /// Run finished.
    Complete,
}

impl SortStage {
    /// Short human-readable stage name.
    pub fn name(&self) -> &'static str {
        match self {
            SortStage::ReadingTable => "Reading selection table",
            SortStage::ScanningSource => "Scanning source directory",
            SortStage::Matching => "Matching tiles",
            SortStage::ResettingTarget => "Resetting target directory",
            SortStage::Copying => "Copying files",
            SortStage::Complete => "Complete",
        }
    }
}

/// Runs the selection and copy pipeline for one [`SortConfig`].
pub struct TileSorter {
    config: SortConfig,
}

impl TileSorter {
    pub fn new(config: SortConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Run the full pipeline.
    pub fn run(&self) -> Result<SortReport, SortError> {
        let (report, _) = self.execute(None, false)?;
        Ok(report)
    }

    /// Run the full pipeline, reporting progress through `on_progress`.
    pub fn run_with_progress(
        &self,
        on_progress: SortProgressCallback,
    ) -> Result<SortReport, SortError> {
        let (report, _) = self.execute(Some(on_progress), false)?;
        Ok(report)
    }

    /// Match without touching the target.
    ///
    /// Returns the report (with `dry_run` set and zero copies) and the
    /// manifest of copies a real run would perform.
    pub fn preview(&self) -> Result<(SortReport, CopyManifest), SortError> {
        self.execute(None, true)
    }

    fn execute(
        &self,
        on_progress: Option<SortProgressCallback>,
        dry_run: bool,
    ) -> Result<(SortReport, CopyManifest), SortError> {
        let progress = |stage: SortStage, fraction: f64, message: &str| {
            if let Some(ref callback) = on_progress {
                callback(stage, fraction, message);
            }
        };

        // Obvious same-path spellings fail before any IO; aliased spellings
        // are caught after the source scan, resolved against the filesystem.
        if self.config.source_dir == self.config.target_dir {
            return Err(SortError::SameDirectory {
                dir: self.config.source_dir.clone(),
            });
        }

        progress(SortStage::ReadingTable, 0.0, "Reading selection table...");
        let table = selection::read_table(&self.config.table_path, &self.config.column)?;
        progress(
            SortStage::ReadingTable,
            1.0,
            &format!("{} rows read", table.records_read()),
        );

        progress(SortStage::ScanningSource, 0.0, "Scanning source directory...");
        let inventory = SourceInventory::scan(&self.config.source_dir)?;
        progress(
            SortStage::ScanningSource,
            1.0,
            &format!("{} files in source", inventory.len()),
        );

        // The destructive reset must never be able to delete source files:
        // a target that names the source under another spelling, or an
        // enclosing directory of it, is rejected here.
        let source_resolved = resolve_dir(inventory.dir());
        let target_resolved = resolve_dir(&self.config.target_dir);
        if target_resolved == source_resolved {
            return Err(SortError::SameDirectory {
                dir: self.config.source_dir.clone(),
            });
        }
        if source_resolved.starts_with(&target_resolved) {
            return Err(SortError::TargetContainsSource {
                source_dir: self.config.source_dir.clone(),
                target_dir: self.config.target_dir.clone(),
            });
        }

        let mut manifest = CopyManifest::new();
        let mut malformed = table.malformed;
        let mut tiles_processed = 0;
        let mut tiles_matched = 0;
        let total_rows = table.rows.len().max(1);

        for (i, row) in table.rows.iter().enumerate() {
            progress(SortStage::Matching, i as f64 / total_rows as f64, &row.tile_code);

            let parts = match self.config.split_rule.split(&row.tile_code) {
                Ok(parts) => parts,
                Err(e) => {
                    warn!(row = row.row, code = %row.tile_code, error = %e, "skipping malformed tile code");
                    malformed += 1;
                    continue;
                }
            };
            let pattern = match self.config.pattern.compile(&parts) {
                Ok(pattern) => pattern,
                Err(e) => {
                    warn!(row = row.row, code = %row.tile_code, error = %e, "skipping uncompilable pattern");
                    malformed += 1;
                    continue;
                }
            };
            tiles_processed += 1;

            let matches = inventory.matching(&pattern);
            debug!(
                code = %row.tile_code,
                pattern = %pattern.as_str(),
                matches = matches.len(),
                "pattern evaluated"
            );
            if !matches.is_empty() {
                tiles_matched += 1;
            }
            for name in matches {
                manifest.push(CopyEntry {
                    filename: name.to_string(),
                    source: inventory.path_of(name),
                    target: self.config.target_dir.join(name),
                });
            }
        }
        progress(
            SortStage::Matching,
            1.0,
            &format!("{} files matched", manifest.len()),
        );

        let (files_copied, failed_copies) = if dry_run {
            debug!("dry run, skipping target reset and copies");
            (0, Vec::new())
        } else {
            progress(
                SortStage::ResettingTarget,
                0.0,
                "Resetting target directory...",
            );
            reset_target(&self.config.target_dir)?;
            progress(SortStage::ResettingTarget, 1.0, "Target directory reset");

            let mut copied = 0;
            let mut failed = Vec::new();
            let total = manifest.len().max(1);
            for (i, entry) in manifest.iter().enumerate() {
                progress(SortStage::Copying, i as f64 / total as f64, &entry.filename);
                match fs::copy(&entry.source, &entry.target) {
                    Ok(_) => copied += 1,
                    Err(e) => {
                        warn!(file = %entry.filename, error = %e, "copy failed");
                        failed.push(CopyFailure {
                            filename: entry.filename.clone(),
                            reason: e.to_string(),
                        });
                    }
                }
            }
            progress(
                SortStage::Copying,
                1.0,
                &format!("{} files copied", copied),
            );
            (copied, failed)
        };

        let report = SortReport {
            source_dir: inventory.dir().to_path_buf(),
            files_in_source: inventory.len(),
            rows_read: table.records_read(),
            malformed_rows: malformed,
            tiles_processed,
            tiles_matched,
            files_matched: manifest.len(),
            files_copied,
            failed_copies,
            dry_run,
        };
        info!(
            tiles = report.tiles_processed,
            matched = report.files_matched,
            copied = report.files_copied,
            failed = report.failed_copies.len(),
            dry_run,
            "sort finished"
        );
        progress(
            SortStage::Complete,
            1.0,
            if dry_run { "Dry run complete" } else { "Sort complete" },
        );
        Ok((report, manifest))
    }
}

/// Filesystem-resolved form of a directory path, for identity comparison.
///
/// An existing path is canonicalized. For a path that does not fully exist
/// the absolute spelling is folded lexically (`.` and `..` removed) and the
/// deepest existing ancestor is canonicalized, so an aliased spelling of an
/// existing directory resolves to the same path whether or not the alias
/// route exists on disk.
fn resolve_dir(path: &Path) -> PathBuf {
    if let Ok(resolved) = fs::canonicalize(path) {
        return resolved;
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    let mut folded = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                folded.pop();
            }
            other => folded.push(other.as_os_str()),
        }
    }

    let mut missing: Vec<OsString> = Vec::new();
    let mut current = folded.as_path();
    loop {
        if let Ok(mut resolved) = fs::canonicalize(current) {
            for name in missing.iter().rev() {
                resolved.push(name);
            }
            return resolved;
        }
        match (current.parent(), current.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                current = parent;
            }
            _ => return folded,
        }
    }
}

/// Delete the target directory if present and recreate it empty.
fn reset_target(dir: &Path) -> Result<(), SortError> {
    if dir.exists() {
        debug!(dir = %dir.display(), "removing existing target directory");
        fs::remove_dir_all(dir).map_err(|e| SortError::TargetReset {
            dir: dir.to_path_buf(),
            source: e,
        })?;
    }
    fs::create_dir_all(dir).map_err(|e| SortError::TargetReset {
        dir: dir.to_path_buf(),
        source: e,
    })
}
