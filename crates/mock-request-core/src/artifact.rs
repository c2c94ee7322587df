//! Reading and writing stored response artifacts.
//!
//! Artifacts are JSON documents holding one [`StoredResponse`] each.

use crate::types::response::StoredResponse;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Artifact read or write failure.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact {} could not be accessed: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("artifact {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("artifact {} could not be encoded: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ArtifactError {
    pub fn path(&self) -> &Path {
        match self {
            ArtifactError::Io { path, .. }
            | ArtifactError::Corrupt { path, .. }
            | ArtifactError::Encode { path, .. } => path,
        }
    }
}

pub fn load_artifact(path: &Path) -> Result<StoredResponse, ArtifactError> {
    let bytes = fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Write an artifact, creating parent directories as needed.
pub fn save_artifact(path: &Path, response: &StoredResponse) -> Result<(), ArtifactError> {
    let io_err = |source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    };

    let bytes = serde_json::to_vec_pretty(response).map_err(|source| ArtifactError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, bytes).map_err(io_err)
}
