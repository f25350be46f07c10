//! Output artifacts
//!
//! Every generated file is held in memory as an [`Artifact`] together with
//! its SHA-256 content digest, then written to the output directory. Files
//! are overwritten on every run.

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::errors::{CapValError, Result};

/// A generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// File name inside the output directory
    pub file_name: String,
    pub content: String,
    /// Hex SHA-256 of `content`
    pub digest: String,
}

impl Artifact {
    pub fn new(file_name: impl Into<String>, content: String) -> Self {
        let digest = content_digest(&content);
        Self {
            file_name: file_name.into(),
            content,
            digest,
        }
    }
}

/// Hex SHA-256 of a text
pub fn content_digest(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Write an artifact into `dir`, creating the directory if needed
///
/// # Errors
///
/// Returns `WriteFailed` with the offending path; nothing is retried.
pub fn write_artifact(dir: &Path, artifact: &Artifact) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| CapValError::WriteFailed {
        path: dir.to_path_buf(),
        message: e.to_string(),
    })?;

    let path = dir.join(&artifact.file_name);
    fs::write(&path, &artifact.content).map_err(|e| CapValError::WriteFailed {
        path: path.clone(),
        message: e.to_string(),
    })?;

    tracing::debug!(
        path = %path.display(),
        digest = %artifact.digest,
        bytes = artifact.content.len(),
        "artifact written"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_digest_is_stable() {
        let a = Artifact::new("model.adl", "CONTEXT Model\nENDCONTEXT".to_string());
        let b = Artifact::new("other.adl", "CONTEXT Model\nENDCONTEXT".to_string());
        assert_eq!(a.digest, b.digest);
        assert_eq!(a.digest.len(), 64);
        assert_ne!(a.digest, content_digest("CONTEXT Model\nENDCONTEXT\n"));
    }

    #[test]
    fn test_write_creates_directory_and_overwrites() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested").join("output");

        let first = write_artifact(&dir, &Artifact::new("rules.adl", "one".to_string())).unwrap();
        let second = write_artifact(&dir, &Artifact::new("rules.adl", "two".to_string())).unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read_to_string(second).unwrap(), "two");
    }

    #[test]
    fn test_write_failure_names_path() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let err = write_artifact(&blocker, &Artifact::new("model.adl", String::new())).unwrap_err();
        match err {
            CapValError::WriteFailed { path, .. } => assert!(path.starts_with(&blocker)),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
