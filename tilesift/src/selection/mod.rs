//! Selection table reading.
//!
//! The selection table is a delimited text export of a GIS attribute table,
//! one row per selected tile. The only column the pipeline needs is the tile
//! code; it can be addressed by position (headerless exports) or by header
//! name. Individual unreadable rows are skipped and counted rather than
//! aborting the run, so one bad row cannot sink a large selection.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, warn};

/// Which column of the table holds the tile code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileColumn {
    /// Zero-based positional index; the table is read without headers.
    Index(usize),
    /// Header name, matched case-insensitively; the first row is the header.
    Name(String),
}

impl Default for TileColumn {
    fn default() -> Self {
        TileColumn::Index(0)
    }
}

impl fmt::Display for TileColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileColumn::Index(i) => write!(f, "{}", i),
            TileColumn::Name(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for TileColumn {
    type Err = std::convert::Infallible;

    /// A numeric string is a positional index, anything else a header name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.parse::<usize>() {
            Ok(index) => Ok(TileColumn::Index(index)),
            Err(_) => Ok(TileColumn::Name(s.to_string())),
        }
    }
}

/// Errors that abort reading a selection table.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// The table file does not exist.
    #[error("selection table not found: {path}")]
    NotFound { path: PathBuf },

    /// The table could not be opened or read.
    #[error("failed to read selection table {path}: {source}")]
    Read { path: PathBuf, source: csv::Error },

    /// The named tile-code column is not in the header row.
    #[error("selection table {path} has no column named '{column}'")]
    MissingColumn { path: PathBuf, column: String },
}

/// One data row of the selection table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRow {
    /// 1-based position among the data rows.
    pub row: usize,
    /// Tile code cell, trimmed. May be empty; the pipeline counts empty
    /// codes as malformed at split time.
    pub tile_code: String,
}

/// All readable rows of a selection table.
#[derive(Debug, Clone, Default)]
pub struct SelectionTable {
    /// Rows with a readable tile-code cell, in file order.
    pub rows: Vec<SelectionRow>,
    /// Rows skipped because the record was unreadable or too short.
    pub malformed: usize,
}

impl SelectionTable {
    /// Number of usable rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no usable rows were read.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total data records encountered, including malformed ones.
    pub fn records_read(&self) -> usize {
        self.rows.len() + self.malformed
    }
}

/// Read the tile-code column from a selection table.
///
/// With [`TileColumn::Index`] the table is read headerless; with
/// [`TileColumn::Name`] the first row is treated as the header and the
/// column is located by case-insensitive name comparison. Records shorter
/// than the addressed column are counted malformed and skipped; I/O errors
/// mid-file abort the read.
pub fn read_table(
    path: impl AsRef<Path>,
    column: &TileColumn,
) -> Result<SelectionTable, SelectionError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SelectionError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let has_headers = matches!(column, TileColumn::Name(_));
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .from_path(path)
        .map_err(|e| SelectionError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

    let index = match column {
        TileColumn::Index(i) => *i,
        TileColumn::Name(name) => {
            let headers = reader.headers().map_err(|e| SelectionError::Read {
                path: path.to_path_buf(),
                source: e,
            })?;
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| SelectionError::MissingColumn {
                    path: path.to_path_buf(),
                    column: name.clone(),
                })?
        }
    };

    let mut rows = Vec::new();
    let mut malformed = 0;
    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let record = match result {
            Ok(record) => record,
            Err(e) if is_io(&e) => {
                return Err(SelectionError::Read {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
            Err(e) => {
                warn!(row, error = %e, "skipping unreadable record");
                malformed += 1;
                continue;
            }
        };

        match record.get(index) {
            Some(code) => rows.push(SelectionRow {
                row,
                tile_code: code.trim().to_string(),
            }),
            None => {
                warn!(row, column = index, "record too short for tile-code column");
                malformed += 1;
            }
        }
    }

    debug!(
        path = %path.display(),
        rows = rows.len(),
        malformed,
        "selection table read"
    );
    Ok(SelectionTable { rows, malformed })
}

fn is_io(err: &csv::Error) -> bool {
    matches!(err.kind(), csv::ErrorKind::Io(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_table(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_read_by_index() {
        let dir = TempDir::new().unwrap();
        let path = write_table(&dir, "tiles.csv", "CB11_1000_4532,12\nCB12_1000_4532,9\n");

        let table = read_table(&path, &TileColumn::Index(0)).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].tile_code, "CB11_1000_4532");
        assert_eq!(table.rows[0].row, 1);
        assert_eq!(table.rows[1].tile_code, "CB12_1000_4532");
        assert_eq!(table.malformed, 0);
    }

    #[test]
    fn test_read_by_name() {
        let dir = TempDir::new().unwrap();
        let path = write_table(
            &dir,
            "tiles.csv",
            "Area,TileName\n12,CB11_1000_4532\n9,CB12_1000_4532\n",
        );

        let column = TileColumn::Name("TileName".to_string());
        let table = read_table(&path, &column).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].tile_code, "CB11_1000_4532");
    }

    #[test]
    fn test_header_match_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let path = write_table(&dir, "tiles.csv", "TileName\nCB11_1000_4532\n");

        let column = TileColumn::Name("tilename".to_string());
        let table = read_table(&path, &column).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_table(dir.path().join("absent.csv"), &TileColumn::Index(0)).unwrap_err();
        assert!(matches!(err, SelectionError::NotFound { .. }));
    }

    #[test]
    fn test_missing_named_column() {
        let dir = TempDir::new().unwrap();
        let path = write_table(&dir, "tiles.csv", "Area,Owner\n12,Crown\n");

        let column = TileColumn::Name("TileName".to_string());
        let err = read_table(&path, &column).unwrap_err();
        assert!(matches!(err, SelectionError::MissingColumn { .. }));
    }

    #[test]
    fn test_short_record_counted_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write_table(&dir, "tiles.csv", "CB11_1000_4532,12,extra\nlonely\n");

        let table = read_table(&path, &TileColumn::Index(2)).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.malformed, 1);
        assert_eq!(table.records_read(), 2);
    }

    #[test]
    fn test_empty_code_cell_is_kept() {
        // Empty cells pass through; the sorter rejects them at split time
        let dir = TempDir::new().unwrap();
        let path = write_table(&dir, "tiles.csv", "CB11_1000_4532,a\n,b\n");

        let table = read_table(&path, &TileColumn::Index(0)).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1].tile_code, "");
    }

    #[test]
    fn test_cells_are_trimmed() {
        let dir = TempDir::new().unwrap();
        let path = write_table(&dir, "tiles.csv", " CB11_1000_4532 ,x\n");

        let table = read_table(&path, &TileColumn::Index(0)).unwrap();
        assert_eq!(table.rows[0].tile_code, "CB11_1000_4532");
    }

    #[test]
    fn test_column_parse() {
        assert_eq!("0".parse::<TileColumn>().unwrap(), TileColumn::Index(0));
        assert_eq!("3".parse::<TileColumn>().unwrap(), TileColumn::Index(3));
        assert_eq!(
            "TileName".parse::<TileColumn>().unwrap(),
            TileColumn::Name("TileName".to_string())
        );
    }

    #[test]
    fn test_column_display_roundtrip() {
        for text in ["0", "7", "TileName"] {
            let column: TileColumn = text.parse().unwrap();
            assert_eq!(column.to_string(), text);
        }
    }
}
