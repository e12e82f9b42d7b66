//! Sort command: run the tile selection and copy pipeline.

use std::path::PathBuf;

use clap::Args;

use tilesift::selection::TileColumn;
use tilesift::sorter::{SortConfig, TileSorter};
use tilesift::tile::SplitRule;

use crate::commands::common;
use crate::error::CliError;

/// Arguments for `tilesift sort`.
#[derive(Debug, Args)]
pub struct SortArgs {
    /// Source directory holding the tile files
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Target directory for copies (deleted and recreated on every run)
    #[arg(long)]
    pub target: Option<PathBuf>,

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

    /// Filename suffix pattern after the code tail
    #[arg(long)]
    pub suffix: Option<String>,

    /// Match and report without resetting the target or copying anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the report as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Run the sort command.
pub fn run(args: SortArgs) -> Result<(), CliError> {
    let config_file = common::load_config();

    let source = common::require_path(
        args.source,
        config_file.paths.source_dir.as_ref(),
        "Source directory",
        "--source",
        "paths.source_dir",
    )?;
    let target = common::require_path(
        args.target,
        config_file.paths.target_dir.as_ref(),
        "Target directory",
        "--target",
        "paths.target_dir",
    )?;
    let table = common::require_path(
        args.table,
        config_file.paths.table.as_ref(),
        "Selection table",
        "--table",
        "paths.table",
    )?;

    let config = SortConfig::new(source, target, table)
        .with_column(common::resolve_column(args.column, &config_file))
        .with_split_rule(common::resolve_split_rule(args.rule, &config_file))
        .with_pattern(common::resolve_pattern(
            args.prefix,
            args.middle,
            args.suffix,
            &config_file,
        ));

    let sorter = TileSorter::new(config);
    if args.dry_run {
        let (report, manifest) = sorter.preview()?;
        if args.json {
            println!("{}", report.to_json());
        } else {
            println!("{}", report.to_text());
            if !manifest.is_empty() {
                println!();
                println!("Would copy to {}:", sorter.config().target_dir.display());
                for entry in manifest.iter() {
                    println!("  {}", entry.filename);
                }
            }
        }
    } else {
        let report = sorter.run()?;
        if args.json {
            println!("{}", report.to_json());
        } else {
            println!("{}", report.to_text());
        }
    }

    Ok(())
}
