//! Configuration for a sorting run.

use std::path::PathBuf;

use crate::selection::TileColumn;
use crate::tile::{PatternSpec, SplitRule};

/// Everything a [`TileSorter`](super::TileSorter) needs for one run.
///
/// Construct with [`SortConfig::new`] and adjust with the `with_*` builders:
///
/// ```
/// use tilesift::selection::TileColumn;
/// use tilesift::sorter::SortConfig;
///
/// let config = SortConfig::new("/data/lidar", "/data/sorted", "/data/selection.csv")
///     .with_column(TileColumn::Name("TileName".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct SortConfig {
    /// Directory holding the candidate tile files.
    pub source_dir: PathBuf,
    /// Directory receiving the copies. Deleted and recreated on every run.
    pub target_dir: PathBuf,
    /// Path of the selection table.
    pub table_path: PathBuf,
    /// Column of the table holding the tile code.
    pub column: TileColumn,
    /// Rule splitting a tile code into head and tail.
    pub split_rule: SplitRule,
    /// Fixed filename pieces around the split code.
    pub pattern: PatternSpec,
}

impl SortConfig {
    /// Create a config with the default column, split rule and pattern.
    pub fn new(
        source_dir: impl Into<PathBuf>,
        target_dir: impl Into<PathBuf>,
        table_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            target_dir: target_dir.into(),
            table_path: table_path.into(),
            column: TileColumn::default(),
            split_rule: SplitRule::default(),
            pattern: PatternSpec::default(),
        }
    }

    /// Set the tile-code column.
    pub fn with_column(mut self, column: TileColumn) -> Self {
        self.column = column;
        self
    }

    /// Set the split rule.
    pub fn with_split_rule(mut self, rule: SplitRule) -> Self {
        self.split_rule = rule;
        self
    }

    /// Set the filename pattern pieces.
    pub fn with_pattern(mut self, pattern: PatternSpec) -> Self {
        self.pattern = pattern;
        self
    }
}
