//! Keeps the JSON docs map of a static blog/docs site in sync with the
//! content files on disk, and carries the site's theme-color table.
// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing
    )
)]

pub mod config;
pub mod logging;
pub mod manifest;
mod metrics;
pub mod sync;
pub mod theme;
pub mod utils;

// Re-export commonly used types
pub use config::{load_config, load_config_from, ConfigError, DocsMapConfig, SyncOverrides};
pub use manifest::{read_manifest, write_manifest, Manifest, ManifestEntry, ManifestError};
pub use sync::{synchronize, SyncError, SyncMode, SyncOptions, SyncOutcome, SyncReport};
pub use theme::{builtin_themes, load_themes, Theme, ThemeError, ThemeTable};
