mod atomic;

pub use atomic::atomic_write;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use std::path::PathBuf;
use std::time::SystemTime;

/// Extension of content files when none is configured
pub const DEFAULT_EXTENSION: &str = "mdx";

/// Documents root used when neither the CLI nor the config file set one
pub const DEFAULT_CONTENT_ROOT: &str = "blogs/docs";

/// Manifest path used when neither the CLI nor the config file set one
pub const DEFAULT_MANIFEST_PATH: &str = "blogs/docs-map.json";

/// Name of the per-user folder holding config and logs
pub const APP_FOLDER: &str = ".docs-map";

/// Current docs-map version
pub const DOCS_MAP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the path to the per-user `~/.docs-map` folder
#[must_use]
pub fn get_app_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_FOLDER))
}

/// Format a timestamp the way the manifest stores it: UTC, milliseconds, `Z`.
#[must_use]
pub fn format_iso(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Get current timestamp in the manifest's ISO 8601 format
#[must_use]
pub fn now_iso() -> String {
    format_iso(Utc::now())
}

/// Convert a filesystem time to UTC, truncated to the millisecond precision
/// the manifest can represent.
#[must_use]
pub fn to_manifest_time(time: SystemTime) -> DateTime<Utc> {
    DateTime::<Utc>::from(time).trunc_subsecs(3)
}

/// Parse a stored manifest timestamp.
#[must_use]
pub fn parse_iso(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Format a path for display, replacing home directory with ~/
#[must_use]
pub fn format_display_path(path: &str) -> String {
    replace_homedir::replace_homedir(path, "~")
}

#[cfg(test)]
#[path = "utils_tests.rs"]
mod tests;
