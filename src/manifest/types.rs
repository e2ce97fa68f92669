use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::{format_iso, parse_iso};

/// One document tracked by the docs map.
///
/// Flat manifests only carry `main` and `updated`; nested manifests also
/// record the sub-documents found under `main` and a creation `date`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManifestEntry {
    pub main: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub updated: String,
}

impl ManifestEntry {
    /// Entry for a document discovered in flat mode
    #[must_use]
    pub fn flat(main: impl Into<String>, now: &str) -> Self {
        Self {
            main: main.into(),
            sub: None,
            date: None,
            updated: now.to_string(),
        }
    }

    /// Entry for a document directory discovered in nested mode
    #[must_use]
    pub fn nested(main: impl Into<String>, sub: impl Into<String>, now: &str) -> Self {
        Self {
            main: main.into(),
            sub: Some(vec![sub.into()]),
            date: Some(now.to_string()),
            updated: now.to_string(),
        }
    }

    /// Append a sub-identifier unless it is already listed.
    ///
    /// Returns `true` when the list changed.
    pub fn push_sub(&mut self, sub: &str) -> bool {
        let subs = self.sub.get_or_insert_with(Vec::new);
        if subs.iter().any(|s| s == sub) {
            return false;
        }
        subs.push(sub.to_string());
        true
    }

    /// Move `updated` forward to `modified` if the file is strictly newer.
    ///
    /// A stored value that is not valid RFC 3339 counts as older than any file.
    /// Returns `true` when `updated` changed.
    pub fn bump_updated(&mut self, modified: DateTime<Utc>) -> bool {
        let newer = match parse_iso(&self.updated) {
            Some(stored) => modified > stored,
            None => true,
        };
        if newer {
            self.updated = format_iso(modified);
        }
        newer
    }
}

/// Ordered list of entries, unique by `main`, persisted as a JSON array.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn find(&self, main: &str) -> Option<&ManifestEntry> {
        self.entries.iter().find(|e| e.main == main)
    }

    pub fn find_mut(&mut self, main: &str) -> Option<&mut ManifestEntry> {
        self.entries.iter_mut().find(|e| e.main == main)
    }

    /// Append an entry. Returns `false` (and leaves the manifest unchanged)
    /// when an entry with the same `main` is already present.
    pub fn insert(&mut self, entry: ManifestEntry) -> bool {
        if self.find(&entry.main).is_some() {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Keep only entries whose `main` satisfies `keep`, returning how many
    /// were dropped.
    pub fn retain_mains<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&str) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(|e| keep(&e.main));
        before.saturating_sub(self.entries.len())
    }

    /// Drop later duplicates of the same `main`, keeping the first.
    ///
    /// Hand-edited manifests can violate uniqueness; everything downstream
    /// assumes it holds.
    pub(crate) fn dedup_mains(&mut self) -> usize {
        let mut seen = std::collections::HashSet::new();
        self.retain_mains(|main| seen.insert(main.to_string()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ManifestEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }
}

impl From<Vec<ManifestEntry>> for Manifest {
    fn from(entries: Vec<ManifestEntry>) -> Self {
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a ManifestEntry;
    type IntoIter = std::slice::Iter<'a, ManifestEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
