use super::{config_path, ConfigError, DocsMapConfig};
use std::path::Path;
use tracing::{debug, warn};

/// Load the configuration from `~/.docs-map/config.toml`.
///
/// Returns `Ok(DocsMapConfig::default())` if the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
pub fn load_config() -> Result<DocsMapConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory; using default config");
        return Ok(DocsMapConfig::default());
    };
    if !path.exists() {
        debug!("Config not found at {}; using defaults", path.display());
        return Ok(DocsMapConfig::default());
    }
    load_config_from(&path)
}

/// Load the configuration from an explicit path, which must exist.
pub fn load_config_from(path: &Path) -> Result<DocsMapConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: DocsMapConfig = toml::from_str(&content).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}
