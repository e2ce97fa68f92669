use crate::manifest::ManifestError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Cannot access documents directory {path}: {source}")]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Existing manifest {path} is not valid: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot read manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: ManifestError,
    },

    #[error("Cannot write manifest {path}: {source}")]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: ManifestError,
    },
}

impl SyncError {
    pub(crate) fn directory(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::DirectoryAccess {
            path: path.into(),
            source,
        }
    }

    /// Map a failed manifest load onto the error the caller acts on.
    pub(crate) fn from_read(err: ManifestError, manifest_path: &Path) -> Self {
        match err {
            ManifestError::ParseError { path, source } => Self::ManifestParse { path, source },
            other => Self::ManifestRead {
                path: manifest_path.to_path_buf(),
                source: other,
            },
        }
    }
}
