//! Filesystem persistence for generated reports.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::StoreError;

/// Content type reported for every stored artifact.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Result of a retrieve operation, including the body and content type.
#[derive(Debug)]
pub struct StoredArtifact {
    pub body: Vec<u8>,
    pub content_type: &'static str,
}

/// Flat directory of generated report files.
///
/// Artifact names are random v4 UUIDs, so concurrent saves cannot collide
/// without an exclusion mechanism.  There is no index; retrieval is by exact
/// file name.  Files are immutable once written and are never cleaned up.
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Opens the store, creating the directory if it does not exist.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::CreateDir {
            dir: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// Returns the directory artifacts are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persists a rendered document under a fresh unique name and returns
    /// the file name.
    pub fn save(&self, bytes: &[u8]) -> Result<String, StoreError> {
        let name = format!("{}.pdf", Uuid::new_v4());
        let path = self.dir.join(&name);
        fs::write(&path, bytes).map_err(|source| StoreError::Write {
            name: name.clone(),
            source,
        })?;
        Ok(name)
    }

    /// Reads back a previously saved artifact by exact file name.
    pub fn retrieve(&self, name: &str) -> Result<StoredArtifact, StoreError> {
        let path = self.dir.join(name);
        if !path.exists() {
            return Err(StoreError::NotFound {
                name: name.to_string(),
            });
        }

        let body = fs::read(&path).map_err(|source| StoreError::Read {
            name: name.to_string(),
            source,
        })?;

        Ok(StoredArtifact {
            body,
            content_type: PDF_CONTENT_TYPE,
        })
    }
}
