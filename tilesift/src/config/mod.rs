//! Persistent configuration.
//!
//! Settings live in an INI file at `~/.tilesift/config.ini` and provide
//! defaults for the CLI; command-line arguments override file values. The
//! file is optional: a missing file means all defaults.

mod file;
mod key;

pub use file::{
    config_file_path, ConfigError, ConfigFile, PathsConfig, PatternConfig, SelectionConfig,
};
pub use key::{ConfigKey, UnknownKey};
