//! Copy manifest accumulated during matching.

use std::path::PathBuf;

/// One planned copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyEntry {
    /// Matched filename, no directory component.
    pub filename: String,
    /// Full path of the file in the source directory.
    pub source: PathBuf,
    /// Full path the file will be copied to.
    pub target: PathBuf,
}

/// Planned copies in match order.
///
/// Entries are never deduplicated: a file matched by two selection rows
/// appears twice and is copied twice, the second copy overwriting the first
/// with identical content.
#[derive(Debug, Clone, Default)]
pub struct CopyManifest {
    entries: Vec<CopyEntry>,
}

impl CopyManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a planned copy.
    pub fn push(&mut self, entry: CopyEntry) {
        self.entries.push(entry);
    }

    /// Number of planned copies, counting duplicates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CopyEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CopyEntry> {
        self.entries.iter()
    }
}
