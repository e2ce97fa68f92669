//! Discovery of content files under the documents root.

use super::{SyncError, SyncMode};
use crate::utils::to_manifest_time;
use chrono::{DateTime, Utc};
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// A content file found during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFile {
    /// Primary identifier: the file stem (flat) or the parent directory (nested)
    pub main: String,
    /// Sub-identifier, nested mode only
    pub sub: Option<String>,
    pub path: PathBuf,
    /// Modification time, truncated to milliseconds
    pub modified: DateTime<Utc>,
}

/// List the immediate children of `dir`, sorted by file name.
///
/// Links are not followed here; callers resolve only the entries they keep.
fn children(dir: &Path) -> impl Iterator<Item = Result<DirEntry, SyncError>> + '_ {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .map(move |entry| entry.map_err(|e| SyncError::directory(dir, io::Error::from(e))))
}

fn utf8_name(entry: &DirEntry) -> Option<&str> {
    let name = entry.file_name().to_str();
    if name.is_none() {
        warn!("Skipping non UTF-8 path {}", entry.path().display());
    }
    name
}

/// Identifier for a content file name, or `None` if the name does not carry
/// the content extension.
#[must_use]
pub fn content_identifier<'a>(file_name: &'a str, extension: &str) -> Option<&'a str> {
    let stem = file_name
        .strip_suffix(extension)?
        .strip_suffix('.')?;
    if stem.is_empty() {
        return None;
    }
    Some(stem)
}

/// Metadata of `entry`, following a symlink to its target. A link whose
/// target is gone yields `None`.
fn resolve(entry: &DirEntry) -> Result<Option<Metadata>, SyncError> {
    let path = entry.path();
    match fs::metadata(path) {
        Ok(metadata) => Ok(Some(metadata)),
        Err(e) if e.kind() == io::ErrorKind::NotFound && entry.path_is_symlink() => {
            warn!("Skipping dangling link {}", path.display());
            Ok(None)
        }
        Err(e) => Err(SyncError::directory(path, e)),
    }
}

fn modified(path: &Path, metadata: &Metadata) -> Result<DateTime<Utc>, SyncError> {
    let time = metadata
        .modified()
        .map_err(|e| SyncError::directory(path, e))?;
    Ok(to_manifest_time(time))
}

/// Content files directly inside `dir`, in file-name order, each keyed by its
/// own stem.
fn content_files_in(dir: &Path, extension: &str) -> Result<Vec<ContentFile>, SyncError> {
    let mut found = Vec::new();
    for entry in children(dir) {
        let entry = entry?;
        let Some(name) = utf8_name(&entry) else {
            continue;
        };
        let Some(id) = content_identifier(name, extension) else {
            debug!("Ignoring {}", entry.path().display());
            continue;
        };
        let Some(metadata) = resolve(&entry)? else {
            continue;
        };
        if !metadata.is_file() {
            continue;
        }
        found.push(ContentFile {
            main: id.to_string(),
            sub: None,
            path: entry.path().to_path_buf(),
            modified: modified(entry.path(), &metadata)?,
        });
    }
    Ok(found)
}

/// Scan `root` for content files according to `mode`.
///
/// Flat mode yields one file per document. Nested mode treats each immediate
/// subdirectory as a document and yields its content files as sub-documents;
/// subdirectories without content files yield nothing.
pub fn scan(root: &Path, mode: SyncMode, extension: &str) -> Result<Vec<ContentFile>, SyncError> {
    match mode {
        SyncMode::Flat => content_files_in(root, extension),
        SyncMode::Nested => {
            let mut found = Vec::new();
            for entry in children(root) {
                let entry = entry?;
                let Some(main) = utf8_name(&entry) else {
                    continue;
                };
                if !resolve(&entry)?.is_some_and(|metadata| metadata.is_dir()) {
                    continue;
                }
                let files = content_files_in(entry.path(), extension)?;
                if files.is_empty() {
                    debug!("No content files in {}", entry.path().display());
                }
                found.extend(files.into_iter().map(|file| ContentFile {
                    main: main.to_string(),
                    sub: Some(file.main),
                    ..file
                }));
            }
            Ok(found)
        }
    }
}
