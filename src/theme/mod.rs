//! Theme-color table consumed by the site's renderer.
//!
//! The table is data only. This module gives it a typed schema so that a
//! malformed table (missing role, ramp of the wrong length, duplicate id) is
//! caught when it is loaded rather than when a page is rendered.

mod types;

pub use types::{ColorRamp, Palette, Theme, RAMP_LEN};

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Table shipped with the binary
const BUILTIN_THEMES: &str = include_str!("../../assets/theme-colors.json");

#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Failed to read theme table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid theme table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate theme id: {0}")]
    DuplicateId(String),
}

/// Ordered list of themes, unique by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeTable {
    themes: Vec<Theme>,
}

impl ThemeTable {
    /// Parse a JSON theme table.
    pub fn from_json(content: &str) -> Result<Self, ThemeError> {
        let themes: Vec<Theme> = serde_json::from_str(content)?;
        let mut ids = HashSet::new();
        for theme in &themes {
            if !ids.insert(theme.id.as_str()) {
                return Err(ThemeError::DuplicateId(theme.id.clone()));
            }
        }
        Ok(Self { themes })
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.themes.iter().map(|t| t.id.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Theme> {
        self.themes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

/// The theme table embedded in the binary.
pub fn builtin_themes() -> Result<ThemeTable, ThemeError> {
    ThemeTable::from_json(BUILTIN_THEMES)
}

/// Load a theme table from a JSON file.
pub fn load_themes(path: &Path) -> Result<ThemeTable, ThemeError> {
    let content = fs::read_to_string(path).map_err(|source| ThemeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = ThemeTable::from_json(&content)?;
    debug!("Loaded {} themes from {}", table.len(), path.display());
    Ok(table)
}

#[cfg(test)]
#[path = "theme_tests.rs"]
mod tests;
