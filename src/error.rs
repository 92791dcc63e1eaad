//! Error types for infrastructure failures
//!
//! Analysis of document text never fails: extractors return empty collections
//! and the validators turn malformed fragments into findings. The variants here
//! cover the remaining failures (reading files, loading metadata, mapping URIs),
//! which callers log and then degrade to an empty or absent result.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ZenithError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("URI does not name a local file: {0}")]
    InvalidUri(String),
}

impl ZenithError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, ZenithError>;
