mod types;

pub use types::{Manifest, ManifestEntry};

use crate::utils::atomic_write;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse manifest {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize manifest: {0}")]
    SerializeError(#[source] serde_json::Error),

    #[error("Failed to write manifest {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read the manifest at `path`.
///
/// A missing file is an empty manifest. A file that exists but is not a JSON
/// array of entries is a [`ManifestError::ParseError`].
pub fn read_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No manifest at {}; starting empty", path.display());
            return Ok(Manifest::new());
        }
        Err(source) => {
            return Err(ManifestError::ReadError {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let mut manifest: Manifest =
        serde_json::from_str(&content).map_err(|source| ManifestError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;

    let duplicates = manifest.dedup_mains();
    if duplicates > 0 {
        warn!(
            "Dropped {duplicates} duplicate entries from {}",
            path.display()
        );
    }

    Ok(manifest)
}

/// Render the manifest the way it is stored on disk: two-space indented JSON
/// with a trailing newline.
pub fn render_manifest(manifest: &Manifest) -> Result<String, ManifestError> {
    let mut content =
        serde_json::to_string_pretty(manifest).map_err(ManifestError::SerializeError)?;
    content.push('\n');
    Ok(content)
}

/// The file a write to `path` should replace. A symlinked manifest is
/// written through to its target so the link itself survives.
fn write_target(path: &Path) -> io::Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => {
            let target = fs::read_link(path)?;
            Ok(match path.parent() {
                Some(parent) => parent.join(target),
                None => target,
            })
        }
        Ok(_) => Ok(path.to_path_buf()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(e) => Err(e),
    }
}

/// Write the manifest to `path`, replacing any previous file atomically.
///
/// The parent directory is created if it does not exist yet.
pub fn write_manifest(path: &Path, manifest: &Manifest) -> Result<(), ManifestError> {
    let content = render_manifest(manifest)?;
    let write_err = |source| ManifestError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    let target = write_target(path).map_err(write_err)?;
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    atomic_write(&target, &content).map_err(write_err)?;

    debug!("Wrote {} entries to {}", manifest.len(), path.display());
    Ok(())
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
