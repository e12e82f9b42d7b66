//! List command: resolve expected tile filenames against the source.

use std::path::PathBuf;

use clap::Args;

use tilesift::inventory::SourceInventory;
use tilesift::listing::{TileList, DEFAULT_EXTENSION};
use tilesift::selection::{self, TileColumn};
use tilesift::tile::SplitRule;

use crate::commands::common;
use crate::error::CliError;

/// Arguments for `tilesift list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Source directory holding the tile files
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Selection table (CSV) listing the chosen tile codes
    #[arg(long)]
    pub table: Option<PathBuf>,

    /// Tile-code column: a zero-based index or a header name
    #[arg(long)]
    pub column: Option<TileColumn>,

    /// Code split rule: split:<n>, ends:<head>:<tail> or regex:<pattern>
    #[arg(long)]
    pub rule: Option<SplitRule>,

    /// Filename prefix before the code head
    #[arg(long)]
    pub prefix: Option<String>,

    /// Filename middle token between head and tail
    #[arg(long)]
    pub middle: Option<String>,

    /// Concrete file extension for list entries
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// Write the list to this file instead of printing it
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Run the list command.
pub fn run(args: ListArgs) -> Result<(), CliError> {
    let config_file = common::load_config();

    let source = common::require_path(
        args.source,
        config_file.paths.source_dir.as_ref(),
        "Source directory",
        "--source",
        "paths.source_dir",
    )?;
    let table_path = common::require_path(
        args.table,
        config_file.paths.table.as_ref(),
        "Selection table",
        "--table",
        "paths.table",
    )?;
    let column = common::resolve_column(args.column, &config_file);
    let rule = common::resolve_split_rule(args.rule, &config_file);
    // The suffix is irrelevant here: the list substitutes the extension
    let pattern = common::resolve_pattern(args.prefix, args.middle, None, &config_file);

    let table = selection::read_table(&table_path, &column)?;
    let inventory = SourceInventory::scan(&source)?;
    let list = TileList::resolve(&table, &inventory, &rule, &pattern, &args.extension);

    match &args.output {
        Some(path) => {
            let written = list.write(path)?;
            println!("Wrote {} paths to {}", written, path.display());
        }
        None => {
            for path in list.present_paths() {
                println!("{}", path.display());
            }
        }
    }

    let missing = list.missing();
    if !missing.is_empty() {
        eprintln!("{} expected file(s) missing from source:", missing.len());
        for entry in missing {
            eprintln!("  {}", entry.filename);
        }
    }
    if list.malformed() > 0 {
        eprintln!("{} malformed row(s) skipped", list.malformed());
    }

    Ok(())
}
