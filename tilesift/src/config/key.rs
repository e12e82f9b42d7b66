//! Typed access to configuration keys.
//!
//! The CLI `config get`/`config set` commands address settings by dotted
//! `section.key` names; this enum keeps the name list, the INI layout and
//! the typed fields of [`ConfigFile`] in one place.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use super::{ConfigError, ConfigFile};
use crate::tile::RuleParseError;

/// A known configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    SourceDir,
    TargetDir,
    Table,
    Prefix,
    Middle,
    Suffix,
    Column,
    SplitRule,
}

/// Error for strings that name no known configuration key.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown configuration key")]
pub struct UnknownKey;

impl ConfigKey {
    /// Every key, grouped by section.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::SourceDir,
            ConfigKey::TargetDir,
            ConfigKey::Table,
            ConfigKey::Prefix,
            ConfigKey::Middle,
            ConfigKey::Suffix,
            ConfigKey::Column,
            ConfigKey::SplitRule,
        ]
    }

    /// Full dotted name, e.g. `paths.source_dir`.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::SourceDir => "paths.source_dir",
            ConfigKey::TargetDir => "paths.target_dir",
            ConfigKey::Table => "paths.table",
            ConfigKey::Prefix => "pattern.prefix",
            ConfigKey::Middle => "pattern.middle",
            ConfigKey::Suffix => "pattern.suffix",
            ConfigKey::Column => "selection.column",
            ConfigKey::SplitRule => "selection.split_rule",
        }
    }

    /// INI section the key lives in.
    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::SourceDir | ConfigKey::TargetDir | ConfigKey::Table => "paths",
            ConfigKey::Prefix | ConfigKey::Middle | ConfigKey::Suffix => "pattern",
            ConfigKey::Column | ConfigKey::SplitRule => "selection",
        }
    }

    /// Key name within its section.
    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::SourceDir => "source_dir",
            ConfigKey::TargetDir => "target_dir",
            ConfigKey::Table => "table",
            ConfigKey::Prefix => "prefix",
            ConfigKey::Middle => "middle",
            ConfigKey::Suffix => "suffix",
            ConfigKey::Column => "column",
            ConfigKey::SplitRule => "split_rule",
        }
    }

    /// Current value as a string; empty means unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        let path_str = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        };
        match self {
            ConfigKey::SourceDir => path_str(&config.paths.source_dir),
            ConfigKey::TargetDir => path_str(&config.paths.target_dir),
            ConfigKey::Table => path_str(&config.paths.table),
            ConfigKey::Prefix => config.pattern.prefix.clone(),
            ConfigKey::Middle => config.pattern.middle.clone(),
            ConfigKey::Suffix => config.pattern.suffix.clone(),
            ConfigKey::Column => config.selection.column.to_string(),
            ConfigKey::SplitRule => config.selection.split_rule.to_string(),
        }
    }

    /// Set the value, validating typed keys. An empty value clears a path.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let as_path = |v: &str| {
            if v.trim().is_empty() {
                None
            } else {
                Some(PathBuf::from(v))
            }
        };
        match self {
            ConfigKey::SourceDir => config.paths.source_dir = as_path(value),
            ConfigKey::TargetDir => config.paths.target_dir = as_path(value),
            ConfigKey::Table => config.paths.table = as_path(value),
            ConfigKey::Prefix => config.pattern.prefix = value.to_string(),
            ConfigKey::Middle => config.pattern.middle = value.to_string(),
            ConfigKey::Suffix => config.pattern.suffix = value.to_string(),
            ConfigKey::Column => config.selection.column = value.parse().unwrap_or_default(),
            ConfigKey::SplitRule => {
                config.selection.split_rule =
                    value.parse().map_err(|e: RuleParseError| {
                        ConfigError::InvalidValue {
                            key: self.name().to_string(),
                            value: value.to_string(),
                            reason: e.to_string(),
                        }
                    })?;
            }
        }
        Ok(())
    }
}

impl FromStr for ConfigKey {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == s)
            .ok_or(UnknownKey)
    }
}
