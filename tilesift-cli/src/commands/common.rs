//! Shared argument resolution.
//!
//! Every value the pipeline needs can come from a CLI flag or from the
//! configuration file; the flag wins when both are present. Paths have no
//! built-in default, so a path missing from both places is a configuration
//! error naming the flag and the config key to set.

use std::path::{Path, PathBuf};

use tracing::warn;

use tilesift::config::{config_file_path, ConfigFile};
use tilesift::selection::TileColumn;
use tilesift::tile::{PatternSpec, SplitRule};

use crate::error::CliError;

/// Load the configuration file, defaulting when it is absent.
///
/// A missing file is the normal first-run state and stays silent. A file
/// that exists but cannot be parsed is reported and then ignored, so a typo
/// does not silently revert every setting to its default.
pub fn load_config() -> ConfigFile {
    load_config_from(config_file_path())
}

fn load_config_from(path: impl AsRef<Path>) -> ConfigFile {
    let path = path.as_ref();
    if !path.exists() {
        return ConfigFile::default();
    }
    ConfigFile::load_from(path).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "ignoring unreadable config file");
        ConfigFile::default()
    })
}

/// Resolve a required path: CLI flag first, then config, else an error
/// telling the user both ways to set it.
pub fn require_path(
    cli: Option<PathBuf>,
    from_config: Option<&PathBuf>,
    what: &str,
    flag: &str,
    key: &str,
) -> Result<PathBuf, CliError> {
    cli.or_else(|| from_config.cloned()).ok_or_else(|| {
        CliError::Config(format!(
            "{} not set. Pass {} or set {} in {}",
            what,
            flag,
            key,
            config_file_path().display()
        ))
    })
}

/// Resolve the tile-code column: CLI flag, then config, then position 0.
pub fn resolve_column(cli: Option<TileColumn>, config: &ConfigFile) -> TileColumn {
    cli.unwrap_or_else(|| config.selection.column.clone())
}

/// Resolve the split rule: CLI flag, then config, then the default rule.
pub fn resolve_split_rule(cli: Option<SplitRule>, config: &ConfigFile) -> SplitRule {
    cli.unwrap_or_else(|| config.selection.split_rule.clone())
}

/// Resolve the pattern pieces, each independently overridable.
pub fn resolve_pattern(
    prefix: Option<String>,
    middle: Option<String>,
    suffix: Option<String>,
    config: &ConfigFile,
) -> PatternSpec {
    PatternSpec {
        prefix: prefix.unwrap_or_else(|| config.pattern.prefix.clone()),
        middle: middle.unwrap_or_else(|| config.pattern.middle.clone()),
        suffix: suffix.unwrap_or_else(|| config.pattern.suffix.clone()),
    }
}
