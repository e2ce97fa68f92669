//! Manifest synchronization.
//!
//! One run scans the documents root, merges what it finds into the existing
//! manifest and writes the result back:
//!
//! - Existing entries get `updated` moved forward when the file is newer.
//! - New documents are appended with the current time.
//! - Entries nothing on disk matches are kept, unless pruning is enabled.
//! - A root with no content files leaves the manifest file untouched.

mod error;
mod scan;

pub use error::SyncError;
pub use scan::{content_identifier, scan, ContentFile};

use crate::manifest::{read_manifest, write_manifest, Manifest, ManifestEntry};
use crate::metrics::OperationTimer;
use crate::utils::{format_display_path, now_iso, DEFAULT_EXTENSION};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, instrument};

/// How documents are laid out under the documents root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    /// One content file per document
    #[default]
    Flat,
    /// One directory per document, its content files are sub-documents
    Nested,
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat => f.write_str("flat"),
            Self::Nested => f.write_str("nested"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    pub content_root: PathBuf,
    pub manifest_path: PathBuf,
    pub mode: SyncMode,
    /// Content file extension, without the leading dot
    pub extension: String,
    /// Drop entries whose document no longer exists on disk
    pub prune_missing: bool,
}

impl SyncOptions {
    #[must_use]
    pub fn new(content_root: impl Into<PathBuf>, manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            content_root: content_root.into(),
            manifest_path: manifest_path.into(),
            mode: SyncMode::default(),
            extension: DEFAULT_EXTENSION.to_string(),
            prune_missing: false,
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: SyncMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the content extension; a leading dot is ignored.
    #[must_use]
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    #[must_use]
    pub fn with_prune_missing(mut self, prune_missing: bool) -> Self {
        self.prune_missing = prune_missing;
        self
    }
}

/// Counters describing what a run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    /// Entries created for documents seen for the first time
    pub added: usize,
    /// Existing entries whose `updated` moved forward
    pub updated: usize,
    /// Existing entries left as they were
    pub unchanged: usize,
    /// Sub-identifiers appended to existing entries
    pub sub_added: usize,
    /// Entries removed because their document is gone
    pub pruned: usize,
    /// Entries in the written manifest
    pub total: usize,
}

impl SyncReport {
    /// Whether the run changed any entry
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.added > 0 || self.updated > 0 || self.sub_added > 0 || self.pruned > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No content files were found; the manifest was not written
    NothingToDo,
    Written(SyncReport),
}

/// Per-entry result of merging one document's files.
#[derive(Default)]
struct EntryChange {
    created: bool,
    bumped: bool,
    subs_added: usize,
}

/// Merge one content file into the manifest.
fn merge_file(manifest: &mut Manifest, file: &ContentFile, now: &str, change: &mut EntryChange) {
    if let Some(entry) = manifest.find_mut(&file.main) {
        if entry.bump_updated(file.modified) && !change.created {
            change.bumped = true;
        }
        if let Some(sub) = &file.sub {
            if entry.push_sub(sub) && !change.created {
                change.subs_added = change.subs_added.saturating_add(1);
            }
        }
        return;
    }

    let entry = match &file.sub {
        Some(sub) => ManifestEntry::nested(file.main.as_str(), sub.as_str(), now),
        None => ManifestEntry::flat(file.main.as_str(), now),
    };
    manifest.insert(entry);
    change.created = true;
}

/// Merge scanned files into `manifest`, returning the run's counters.
///
/// Files are grouped by primary identifier in scan order, so a nested
/// directory counts as one added or updated entry however many files it has.
pub fn merge(
    manifest: &mut Manifest,
    files: &[ContentFile],
    now: &str,
    prune_missing: bool,
) -> SyncReport {
    let mut report = SyncReport::default();
    let mut seen: Vec<&str> = Vec::new();
    let mut changes: Vec<EntryChange> = Vec::new();

    for file in files {
        let slot = match seen.iter().position(|main| *main == file.main) {
            Some(slot) => slot,
            None => {
                seen.push(&file.main);
                changes.push(EntryChange::default());
                seen.len().saturating_sub(1)
            }
        };
        if let Some(change) = changes.get_mut(slot) {
            merge_file(manifest, file, now, change);
        }
    }

    for change in &changes {
        if change.created {
            report.added = report.added.saturating_add(1);
        } else if change.bumped {
            report.updated = report.updated.saturating_add(1);
        } else if change.subs_added == 0 {
            report.unchanged = report.unchanged.saturating_add(1);
        }
        report.sub_added = report.sub_added.saturating_add(change.subs_added);
    }

    if prune_missing {
        let present: HashSet<&str> = seen.iter().copied().collect();
        report.pruned = manifest.retain_mains(|main| present.contains(main));
    }

    report.total = manifest.len();
    report
}

/// Synchronize the manifest at `options.manifest_path` with the content files
/// under `options.content_root`.
///
/// The documents root is created if it does not exist. When it holds no
/// content files the run returns [`SyncOutcome::NothingToDo`] without touching
/// the manifest.
#[instrument(
    name = "sync.run",
    skip(options),
    fields(mode = %options.mode, root = %options.content_root.display())
)]
pub fn synchronize(options: &SyncOptions) -> Result<SyncOutcome, SyncError> {
    let _timer = OperationTimer::new("synchronize");
    let root = &options.content_root;
    let root_display = format_display_path(&root.to_string_lossy());

    fs::create_dir_all(root).map_err(|e| SyncError::directory(root, e))?;

    let mut manifest = read_manifest(&options.manifest_path)
        .map_err(|e| SyncError::from_read(e, &options.manifest_path))?;
    debug!("Loaded {} manifest entries", manifest.len());

    let files = scan(root, options.mode, &options.extension)?;
    if files.is_empty() {
        info!(
            "No .{} files found in {}; nothing to do",
            options.extension, root_display
        );
        return Ok(SyncOutcome::NothingToDo);
    }
    debug!("Found {} content files", files.len());

    let report = merge(&mut manifest, &files, &now_iso(), options.prune_missing);

    write_manifest(&options.manifest_path, &manifest).map_err(|source| {
        SyncError::ManifestWrite {
            path: options.manifest_path.clone(),
            source,
        }
    })?;

    info!(
        added = report.added,
        updated = report.updated,
        unchanged = report.unchanged,
        sub_added = report.sub_added,
        pruned = report.pruned,
        "Wrote {} entries to {}",
        report.total,
        format_display_path(&options.manifest_path.to_string_lossy())
    );

    Ok(SyncOutcome::Written(report))
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
