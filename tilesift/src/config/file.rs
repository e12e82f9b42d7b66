//! INI-backed configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;
use tracing::warn;

use crate::selection::TileColumn;
use crate::tile::{SplitRule, DEFAULT_MIDDLE, DEFAULT_PREFIX, DEFAULT_SUFFIX};

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or parsed.
    #[error("failed to load config {path}: {source}")]
    Load { path: PathBuf, source: ini::Error },

    /// The file could not be written.
    #[error("failed to write config {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },

    /// A value rejected by a typed setter.
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Path defaults for the pipeline. Unset paths must be supplied on the
/// command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathsConfig {
    /// Source directory holding tile files.
    pub source_dir: Option<PathBuf>,
    /// Target directory for copies.
    pub target_dir: Option<PathBuf>,
    /// Selection table path.
    pub table: Option<PathBuf>,
}

/// Filename pattern pieces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternConfig {
    pub prefix: String,
    pub middle: String,
    pub suffix: String,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            middle: DEFAULT_MIDDLE.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}

/// Selection table settings.
#[derive(Debug, Clone)]
pub struct SelectionConfig {
    /// Column holding the tile code.
    pub column: TileColumn,
    /// Rule splitting a tile code into head and tail.
    pub split_rule: SplitRule,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            column: TileColumn::default(),
            split_rule: SplitRule::default(),
        }
    }
}

/// The whole configuration file.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub paths: PathsConfig,
    pub pattern: PatternConfig,
    pub selection: SelectionConfig,
}

/// Location of the configuration file: `~/.tilesift/config.ini`.
///
/// Falls back to the current directory when no home directory is available.
pub fn config_file_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tilesift")
        .join("config.ini")
}

impl ConfigFile {
    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(config_file_path())
    }

    /// Load from a specific path.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Load {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::from_ini(&ini))
    }

    /// Save to the default location, creating the parent directory.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(config_file_path())
    }

    /// Save to a specific path.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
        self.to_ini()
            .write_to_file(path)
            .map_err(|e| ConfigError::Write {
                path: path.to_path_buf(),
                source: e,
            })
    }

    /// Empty values are treated as unset so a saved template with blank keys
    /// round-trips to defaults.
    fn from_ini(ini: &Ini) -> Self {
        let mut config = Self::default();

        if let Some(section) = ini.section(Some("paths")) {
            config.paths.source_dir = non_empty(section.get("source_dir")).map(PathBuf::from);
            config.paths.target_dir = non_empty(section.get("target_dir")).map(PathBuf::from);
            config.paths.table = non_empty(section.get("table")).map(PathBuf::from);
        }

        if let Some(section) = ini.section(Some("pattern")) {
            if let Some(value) = section.get("prefix") {
                config.pattern.prefix = value.to_string();
            }
            if let Some(value) = section.get("middle") {
                config.pattern.middle = value.to_string();
            }
            if let Some(value) = non_empty(section.get("suffix")) {
                config.pattern.suffix = value.to_string();
            }
        }

        if let Some(section) = ini.section(Some("selection")) {
            if let Some(value) = non_empty(section.get("column")) {
                config.selection.column = value.parse().unwrap_or_default();
            }
            if let Some(value) = non_empty(section.get("split_rule")) {
                match value.parse() {
                    Ok(rule) => config.selection.split_rule = rule,
                    Err(e) => {
                        warn!(value, error = %e, "ignoring invalid split_rule in config file")
                    }
                }
            }
        }

        config
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        let path_str = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        };

        ini.with_section(Some("paths"))
            .set("source_dir", path_str(&self.paths.source_dir))
            .set("target_dir", path_str(&self.paths.target_dir))
            .set("table", path_str(&self.paths.table));
        ini.with_section(Some("pattern"))
            .set("prefix", self.pattern.prefix.as_str())
            .set("middle", self.pattern.middle.as_str())
            .set("suffix", self.pattern.suffix.as_str());
        ini.with_section(Some("selection"))
            .set("column", self.selection.column.to_string())
            .set("split_rule", self.selection.split_rule.to_string());
        ini
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
