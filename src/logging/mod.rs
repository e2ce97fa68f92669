mod init;
pub use init::{init_logging, parse_rotation};
use std::path::PathBuf;
use tracing::Level;
use tracing_appender::rolling::Rotation;
/// Log filename used when a log directory is configured.
pub const LOG_FILENAME: &str = "docs-map.log";
/// Configuration for the logging system.
pub struct LogConfig {
    /// Also write logs to a rolling file in this directory
    pub log_dir: Option<PathBuf>,
    pub log_level: Level,
    pub json_format: bool,
    pub rotation: Rotation,
}
impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            log_level: Level::INFO,
            json_format: false,
            rotation: Rotation::DAILY,
        }
    }
}
/// Default log directory, `~/.docs-map/logs`.
#[must_use]
pub fn default_log_dir() -> Option<PathBuf> {
    crate::utils::get_app_path().map(|p| p.join("logs"))
}
#[cfg(test)]
#[path = "../logging_tests.rs"]
mod logging_tests;
