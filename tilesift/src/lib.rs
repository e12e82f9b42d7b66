//! Tile selection and copy pipeline for LIDAR/DEM datasets.
//!
//! A GIS user selects tiles in an index layer and exports the attribute
//! table; `tilesift` turns that export into a directory of the matching
//! tile files. For each selected tile code it derives a filename pattern
//! (prefix + code head + date/resolution middle + code tail + wildcard),
//! matches the pattern against a snapshot of the source directory, resets
//! the target directory and copies every match, preserving filenames.
//!
//! The main entry point is [`sorter::TileSorter`], configured through
//! [`sorter::SortConfig`]:
//!
//! ```no_run
//! use tilesift::sorter::{SortConfig, TileSorter};
//!
//! # fn main() -> Result<(), tilesift::sorter::SortError> {
//! let config = SortConfig::new("/data/lidar", "/data/sorted", "/data/selection.csv");
//! let report = TileSorter::new(config).run()?;
//! println!("{}", report.to_text());
//! # Ok(())
//! # }
//! ```
//!
//! [`listing::TileList`] covers the companion workflow: resolving the
//! selection to concrete expected filenames and writing an input list for
//! mosaicking tools.

pub mod config;
pub mod inventory;
pub mod listing;
pub mod selection;
pub mod sorter;
pub mod tile;
