//! Atomic file write operations.
//!
//! The target is replaced through a `tempfile::NamedTempFile` created next to
//! it, so readers see either the old content or the new content and never a
//! partially written file. The temp file is removed if any step fails.

use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Write content to a file atomically using a temporary file.
///
/// The temp file lives in the target's parent directory (a rename is only
/// atomic within one filesystem). Its contents are flushed and synced before
/// it is persisted over `path`.
///
/// # Errors
///
/// Returns an `io::Error` if:
/// - The parent directory cannot be determined
/// - The temp file cannot be created or written
/// - The rename onto the target fails
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if p.as_os_str().is_empty() => Path::new("."),
        Some(p) => p,
        None => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))
        }
    };

    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.flush()?;
    temp_file.as_file().sync_all()?;

    // Consumes the NamedTempFile, so nothing is deleted after the rename
    temp_file.persist(path).map_err(|e| e.error)?;

    Ok(())
}
