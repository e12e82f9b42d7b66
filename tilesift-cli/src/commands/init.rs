//! Init command: create the configuration file.

use tilesift::config::config_file_path;

use crate::commands::common;
use crate::error::CliError;

/// Write the configuration file, preserving any existing settings.
///
/// Loading first and saving back means running `init` on an existing file
/// fills in missing keys without clobbering the values already set.
pub fn run() -> Result<(), CliError> {
    let config = common::load_config();
    config.save()?;

    let path = config_file_path();
    println!("Configuration file: {}", path.display());
    println!();
    println!("Edit this file to set default paths and filename pieces.");
    println!("Command-line flags override config values when given.");
    Ok(())
}
