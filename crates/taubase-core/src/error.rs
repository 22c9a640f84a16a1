//! Error types for graph construction, serialization and the artifact cache

use std::path::PathBuf;

use thiserror::Error;

use crate::model::NodeId;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("edge endpoint {0:?} is not a node of this graph")]
    MissingNode(NodeId),
}

/// Errors raised while reading or writing one of the on-disk formats.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary encoding error: {0}")]
    Binary(#[from] bincode::Error),

    #[error("corrupt artifact: {0}")]
    CorruptArtifact(String),

    #[error("invalid graph: {0}")]
    Graph(#[from] GraphError),
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("no directory given and no default directory configured")]
    NoDirectory,

    #[error("directory does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("cache I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cache artifact {} is unreadable: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },
}

impl CacheError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CacheError::Io {
            path: path.into(),
            source,
        }
    }
}
