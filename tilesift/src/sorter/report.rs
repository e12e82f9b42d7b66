//! Run report for the sorting pipeline.

use std::path::PathBuf;

use serde::Serialize;

/// A copy that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyFailure {
    /// Filename that failed to copy.
    pub filename: String,
    /// Cause, as reported by the OS.
    pub reason: String,
}

/// Summary of one sorting run.
#[derive(Debug, Clone)]
pub struct SortReport {
    /// Source directory that was snapshotted.
    pub source_dir: PathBuf,
    /// Files in the source snapshot.
    pub files_in_source: usize,
    /// Data records encountered in the selection table.
    pub rows_read: usize,
    /// Records skipped because no usable pattern could be derived.
    pub malformed_rows: usize,
    /// Rows whose pattern was matched against the snapshot.
    pub tiles_processed: usize,
    /// Tiles that matched at least one file.
    pub tiles_matched: usize,
    /// Files matched across all tiles, counting duplicates.
    pub files_matched: usize,
    /// Files successfully copied.
    pub files_copied: usize,
    /// Copies that failed.
    pub failed_copies: Vec<CopyFailure>,
    /// Whether this was a dry run. Dry runs match but never reset or copy.
    pub dry_run: bool,
}

/// Stable JSON shape consumed by downstream tooling. Field names and order
/// are part of the interface; change them only with the consumers.
#[derive(Serialize)]
struct JsonReport<'a> {
    source_dir: String,
    num_files_in_source: usize,
    num_tiles_processed: usize,
    num_files_matched: usize,
    num_files_copied: usize,
    failed_copies: Vec<&'a str>,
}

impl SortReport {
    /// Average files copied per tile with at least one match.
    pub fn files_per_tile(&self) -> f64 {
        if self.tiles_matched == 0 {
            0.0
        } else {
            self.files_copied as f64 / self.tiles_matched as f64
        }
    }

    /// Whether every planned copy succeeded.
    pub fn is_clean(&self) -> bool {
        self.failed_copies.is_empty()
    }

    /// Human-readable multi-line summary.
    pub fn to_text(&self) -> String {
        let mut lines = Vec::new();
        lines.push("Tile Sort Report".to_string());
        lines.push("================".to_string());
        lines.push(String::new());

        if self.dry_run {
            lines.push("Dry run: target not reset, no files copied".to_string());
            lines.push(String::new());
        }

        lines.push(format!("Source directory: {}", self.source_dir.display()));
        lines.push(format!("Files in source:  {}", self.files_in_source));
        lines.push(String::new());
        lines.push(format!("Rows read:        {}", self.rows_read));
        lines.push(format!("Malformed rows:   {}", self.malformed_rows));
        lines.push(format!("Tiles processed:  {}", self.tiles_processed));
        lines.push(format!("Tiles matched:    {}", self.tiles_matched));
        lines.push(format!("Files matched:    {}", self.files_matched));
        lines.push(format!("Files copied:     {}", self.files_copied));
        lines.push(format!("Files per tile:   {:.1}", self.files_per_tile()));

        if !self.failed_copies.is_empty() {
            lines.push(String::new());
            lines.push(format!("Failed copies ({}):", self.failed_copies.len()));
            for failure in &self.failed_copies {
                lines.push(format!("  {}: {}", failure.filename, failure.reason));
            }
        }

        lines.join("\n")
    }

    /// Machine-readable summary in the stable [`JsonReport`] shape.
    pub fn to_json(&self) -> String {
        let report = JsonReport {
            source_dir: self.source_dir.display().to_string(),
            num_files_in_source: self.files_in_source,
            num_tiles_processed: self.tiles_processed,
            num_files_matched: self.files_matched,
            num_files_copied: self.files_copied,
            failed_copies: self
                .failed_copies
                .iter()
                .map(|f| f.filename.as_str())
                .collect(),
        };
        serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> SortReport {
        SortReport {
            source_dir: PathBuf::from("/data/lidar"),
            files_in_source: 120,
            rows_read: 10,
            malformed_rows: 1,
            tiles_processed: 9,
            tiles_matched: 8,
            files_matched: 15,
            files_copied: 14,
            failed_copies: vec![CopyFailure {
                filename: "DEM_CB11_2016_1000_4532.tif".to_string(),
                reason: "permission denied".to_string(),
            }],
            dry_run: false,
        }
    }

    #[test]
    fn test_files_per_tile() {
        let report = sample_report();
        assert!((report.files_per_tile() - 1.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_files_per_tile_no_matches() {
        let mut report = sample_report();
        report.tiles_matched = 0;
        report.files_copied = 0;
        assert_eq!(report.files_per_tile(), 0.0);
    }

    #[test]
    fn test_text_report_lists_failures() {
        let text = sample_report().to_text();
        assert!(text.contains("Tile Sort Report"));
        assert!(text.contains("Files copied:     14"));
        assert!(text.contains("DEM_CB11_2016_1000_4532.tif: permission denied"));
        assert!(!text.contains("Dry run"));
    }

    #[test]
    fn test_text_report_marks_dry_run() {
        let mut report = sample_report();
        report.dry_run = true;
        assert!(report.to_text().contains("Dry run"));
    }

    #[test]
    fn test_json_report_schema() {
        let json = sample_report().to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 6);
        assert_eq!(object["source_dir"], "/data/lidar");
        assert_eq!(object["num_files_in_source"], 120);
        assert_eq!(object["num_tiles_processed"], 9);
        assert_eq!(object["num_files_matched"], 15);
        assert_eq!(object["num_files_copied"], 14);
        assert_eq!(
            object["failed_copies"],
            serde_json::json!(["DEM_CB11_2016_1000_4532.tif"])
        );
    }

    #[test]
    fn test_is_clean() {
        let mut report = sample_report();
        assert!(!report.is_clean());
        report.failed_copies.clear();
        assert!(report.is_clean());
    }
}
