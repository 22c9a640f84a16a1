//! Error types for the aggregation engine

use std::path::PathBuf;

use taubase_core::{CacheError, Graph};
use thiserror::Error;

use crate::export::ExportError;

#[derive(Debug, Error)]
pub enum RepoError {
    /// Bad setup: missing directory, missing metadata, unknown exporter.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("repository {name} failed to produce a graph: {cause:#}")]
    Provider { name: String, cause: anyhow::Error },

    #[error(transparent)]
    Export(#[from] Box<ExportFailure>),

    #[error("operation cancelled")]
    Cancelled,

    #[error("capability unavailable: {0}")]
    Unavailable(String),
}

impl RepoError {
    /// The combined graph computed before a mandatory export failed, if any.
    pub fn into_graph(self) -> Option<Graph> {
        match self {
            RepoError::Export(failure) => Some(failure.graph),
            _ => None,
        }
    }
}

/// A mandatory exporter failed after the combined graph was built.
#[derive(Debug, Error)]
#[error("mandatory export {exporter} to {} failed: {error}", path.display())]
pub struct ExportFailure {
    pub exporter: String,
    pub path: PathBuf,
    #[source]
    pub error: ExportError,
    /// The in-memory graph, still usable by the caller.
    pub graph: Graph,
}
