//! User configuration loaded from `~/.docs-map/config.toml`.
//!
//! The file is optional; if it does not exist all fields fall back to their
//! `Default` values. Relative paths are resolved against the working
//! directory of the run, not the location of the config file.

mod loader;

pub use loader::{load_config, load_config_from};

use crate::sync::{SyncMode, SyncOptions};
use crate::utils::{get_app_path, DEFAULT_CONTENT_ROOT, DEFAULT_EXTENSION, DEFAULT_MANIFEST_PATH};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Name of the config file inside `~/.docs-map`
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config TOML {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

fn default_content_root() -> PathBuf {
    PathBuf::from(DEFAULT_CONTENT_ROOT)
}

fn default_manifest_path() -> PathBuf {
    PathBuf::from(DEFAULT_MANIFEST_PATH)
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

/// Synchronization settings (`[sync]` table).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    #[serde(default = "default_content_root")]
    pub content_root: PathBuf,
    #[serde(default = "default_manifest_path")]
    pub manifest_path: PathBuf,
    #[serde(default)]
    pub mode: SyncMode,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default)]
    pub prune_missing: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            content_root: default_content_root(),
            manifest_path: default_manifest_path(),
            mode: SyncMode::default(),
            extension: default_extension(),
            prune_missing: false,
        }
    }
}

/// Values given on the command line; `None` keeps the configured value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOverrides {
    pub content_root: Option<PathBuf>,
    pub manifest_path: Option<PathBuf>,
    pub mode: Option<SyncMode>,
    pub extension: Option<String>,
    pub prune_missing: bool,
}

impl SyncConfig {
    /// Combine the configured values with command-line overrides.
    ///
    /// `prune_missing` is enabled if either side enables it.
    #[must_use]
    pub fn resolve(&self, overrides: SyncOverrides) -> SyncOptions {
        let content_root = overrides
            .content_root
            .unwrap_or_else(|| self.content_root.clone());
        let manifest_path = overrides
            .manifest_path
            .unwrap_or_else(|| self.manifest_path.clone());
        let extension = overrides.extension.unwrap_or_else(|| self.extension.clone());

        SyncOptions::new(content_root, manifest_path)
            .with_mode(overrides.mode.unwrap_or(self.mode))
            .with_extension(&extension)
            .with_prune_missing(self.prune_missing || overrides.prune_missing)
    }
}

/// Theme table settings (`[themes]` table).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ThemesConfig {
    /// External theme table to use instead of the built-in one
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Top-level configuration, deserialized from `~/.docs-map/config.toml`.
///
/// All fields are optional at the TOML level.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocsMapConfig {
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub themes: ThemesConfig,
}

/// Resolve the canonical path for the config file.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    get_app_path().map(|p| p.join(CONFIG_FILENAME))
}

#[cfg(test)]
#[path = "../config_tests.rs"]
mod config_tests;
