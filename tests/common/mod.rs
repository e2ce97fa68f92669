//! Common test utilities

// Not every test binary uses every helper
#![allow(dead_code)]

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// A scratch site with a documents root and a manifest path inside it
pub struct TestSite {
    pub dir: TempDir,
}

impl TestSite {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp directory"),
        }
    }

    pub fn docs(&self) -> PathBuf {
        self.dir.path().join("blogs").join("docs")
    }

    pub fn manifest(&self) -> PathBuf {
        self.dir.path().join("blogs").join("docs-map.json")
    }

    /// Write a content file relative to the documents root
    pub fn write_doc(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.docs().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create doc directory");
        }
        std::fs::write(&path, content).expect("Failed to write doc");
        path
    }

    pub fn manifest_text(&self) -> String {
        std::fs::read_to_string(self.manifest()).expect("Failed to read manifest")
    }

    pub fn manifest_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.manifest_text()).expect("Manifest should be valid JSON")
    }
}

/// Set a file's modification time
pub fn set_mtime(path: &Path, time: SystemTime) {
    File::options()
        .write(true)
        .open(path)
        .expect("Failed to open file")
        .set_modified(time)
        .expect("Failed to set modification time");
}

/// A point in time well before any test run
pub fn long_ago() -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000)
}
