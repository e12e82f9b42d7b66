//! Expected-filename lists for downstream raster tools.
//!
//! Mosaicking tools take a text file of input paths rather than a directory.
//! This module mirrors the sorter's filename derivation but substitutes a
//! concrete extension for the wildcard suffix, so each selected tile resolves
//! to exactly one expected file. Entries are checked against the source
//! snapshot; only files actually present are written to the list.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::inventory::SourceInventory;
use crate::selection::SelectionTable;
use crate::tile::{PatternSpec, SplitRule};

/// Default concrete extension for list entries.
pub const DEFAULT_EXTENSION: &str = ".tif";

/// Errors from writing a tile list.
#[derive(Debug, Error)]
pub enum ListError {
    /// The list file could not be written.
    #[error("failed to write tile list {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
}

/// One selected tile resolved to its expected file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileListEntry {
    /// Tile code from the selection table.
    pub tile_code: String,
    /// Derived filename.
    pub filename: String,
    /// Full path under the source directory.
    pub path: PathBuf,
    /// Whether the file exists in the source snapshot.
    pub present: bool,
}

/// Expected filenames for a selection, resolved against a source snapshot.
#[derive(Debug, Clone)]
pub struct TileList {
    entries: Vec<TileListEntry>,
    malformed: usize,
}

impl TileList {
    /// Derive one expected filename per selection row and check presence.
    ///
    /// Rows whose code cannot be split are skipped and counted, matching the
    /// sorter's treatment of malformed rows.
    pub fn resolve(
        table: &SelectionTable,
        inventory: &SourceInventory,
        rule: &SplitRule,
        pattern: &PatternSpec,
        extension: &str,
    ) -> Self {
        let mut entries = Vec::new();
        let mut malformed = table.malformed;

        for row in &table.rows {
            let parts = match rule.split(&row.tile_code) {
                Ok(parts) => parts,
                Err(e) => {
                    warn!(row = row.row, code = %row.tile_code, error = %e, "skipping malformed tile code");
                    malformed += 1;
                    continue;
                }
            };
            let filename = pattern.filename(&parts, extension);
            let present = inventory.contains(&filename);
            if !present {
                debug!(file = %filename, "expected file not in source");
            }
            entries.push(TileListEntry {
                tile_code: row.tile_code.clone(),
                path: inventory.path_of(&filename),
                filename,
                present,
            });
        }

        Self { entries, malformed }
    }

    /// All resolved entries, present or not, in table order.
    pub fn entries(&self) -> &[TileListEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows skipped because the code would not split.
    pub fn malformed(&self) -> usize {
        self.malformed
    }

    /// Entries whose expected file is not in the source.
    pub fn missing(&self) -> Vec<&TileListEntry> {
        self.entries.iter().filter(|e| !e.present).collect()
    }

    /// Paths of the entries present in the source, in table order.
    pub fn present_paths(&self) -> Vec<&Path> {
        self.entries
            .iter()
            .filter(|e| e.present)
            .map(|e| e.path.as_path())
            .collect()
    }

    /// Write the present entries to `path`, one full path per line.
    ///
    /// Returns the number of paths written. Missing entries are omitted so
    /// the list never points a downstream tool at a nonexistent file.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<usize, ListError> {
        let path = path.as_ref();
        let mut contents = String::new();
        let mut written = 0;
        for entry in self.entries.iter().filter(|e| e.present) {
            contents.push_str(&entry.path.display().to_string());
            contents.push('\n');
            written += 1;
        }
        fs::write(path, contents).map_err(|e| ListError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;
        info!(path = %path.display(), written, "tile list written");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectionRow;
    use tempfile::TempDir;

    fn table_of(codes: &[&str]) -> SelectionTable {
        SelectionTable {
            rows: codes
                .iter()
                .enumerate()
                .map(|(i, code)| SelectionRow {
                    row: i + 1,
                    tile_code: code.to_string(),
                })
                .collect(),
            malformed: 0,
        }
    }

    fn source_with(dir: &TempDir, names: &[&str]) -> SourceInventory {
        for name in names {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        SourceInventory::scan(dir.path()).unwrap()
    }

    #[test]
    fn test_resolve_marks_presence() {
        let dir = TempDir::new().unwrap();
        let inventory = source_with(&dir, &["DEM_CB11_2016_1000_4532.tif"]);
        let table = table_of(&["CB11_1000_4532", "CB12_1000_4532"]);

        let list = TileList::resolve(
            &table,
            &inventory,
            &SplitRule::default(),
            &PatternSpec::default(),
            DEFAULT_EXTENSION,
        );

        assert_eq!(list.len(), 2);
        assert!(list.entries()[0].present);
        assert!(!list.entries()[1].present);
        assert_eq!(list.missing().len(), 1);
        assert_eq!(list.missing()[0].tile_code, "CB12_1000_4532");
    }

    #[test]
    fn test_resolve_counts_malformed_codes() {
        let dir = TempDir::new().unwrap();
        let inventory = source_with(&dir, &["unrelated.tif"]);
        let table = table_of(&["CB11_1000_4532", "x"]);

        let list = TileList::resolve(
            &table,
            &inventory,
            &SplitRule::default(),
            &PatternSpec::default(),
            DEFAULT_EXTENSION,
        );

        assert_eq!(list.len(), 1);
        assert_eq!(list.malformed(), 1);
    }

    #[test]
    fn test_write_only_present_paths() {
        let dir = TempDir::new().unwrap();
        let inventory = source_with(&dir, &["DEM_CB11_2016_1000_4532.tif"]);
        let table = table_of(&["CB11_1000_4532", "CB12_1000_4532"]);

        let list = TileList::resolve(
            &table,
            &inventory,
            &SplitRule::default(),
            &PatternSpec::default(),
            DEFAULT_EXTENSION,
        );

        let out = dir.path().join("tiles.txt");
        let written = list.write(&out).unwrap();
        assert_eq!(written, 1);

        let contents = fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("DEM_CB11_2016_1000_4532.tif"));
    }

    #[test]
    fn test_present_paths_in_table_order() {
        let dir = TempDir::new().unwrap();
        let inventory = source_with(
            &dir,
            &[
                "DEM_CB11_2016_1000_4532.tif",
                "DEM_CB12_2016_1000_4532.tif",
            ],
        );
        let table = table_of(&["CB12_1000_4532", "CB11_1000_4532"]);

        let list = TileList::resolve(
            &table,
            &inventory,
            &SplitRule::default(),
            &PatternSpec::default(),
            DEFAULT_EXTENSION,
        );

        let paths = list.present_paths();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("DEM_CB12_2016_1000_4532.tif"));
        assert!(paths[1].ends_with("DEM_CB11_2016_1000_4532.tif"));
    }
}
