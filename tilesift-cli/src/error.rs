//! CLI error types.

use std::fmt;

use tilesift::config::ConfigError;
use tilesift::inventory::InventoryError;
use tilesift::listing::ListError;
use tilesift::selection::SelectionError;
use tilesift::sorter::SortError;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// The sorting pipeline failed.
    Sort(SortError),

    /// Reading the selection table failed.
    Selection(SelectionError),

    /// Snapshotting the source directory failed.
    Inventory(InventoryError),

    /// Writing a tile list failed.
    List(ListError),

    /// Loading or saving the configuration file failed.
    ConfigFile(ConfigError),

    /// Invalid or missing configuration.
    Config(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Sort(e) => write!(f, "{}", e),
            CliError::Selection(e) => write!(f, "{}", e),
            CliError::Inventory(e) => write!(f, "{}", e),
            CliError::List(e) => write!(f, "{}", e),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Sort(e) => Some(e),
            CliError::Selection(e) => Some(e),
            CliError::Inventory(e) => Some(e),
            CliError::List(e) => Some(e),
            CliError::ConfigFile(e) => Some(e),
            CliError::Config(_) => None,
        }
    }
}

impl From<SortError> for CliError {
    fn from(e: SortError) -> Self {
        CliError::Sort(e)
    }
}

impl From<SelectionError> for CliError {
    fn from(e: SelectionError) -> Self {
        CliError::Selection(e)
    }
}

impl From<InventoryError> for CliError {
    fn from(e: InventoryError) -> Self {
        CliError::Inventory(e)
    }
}

impl From<ListError> for CliError {
    fn from(e: ListError) -> Self {
        CliError::List(e)
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::ConfigFile(e)
    }
}
