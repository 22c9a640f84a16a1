//! Provider reading a binary graph artifact, e.g. another aggregate's cache

use std::path::{Path, PathBuf};

use anyhow::Result;
use taubase_core::{Graph, load_graph};

use super::{FetchContext, Repository, report_loaded};
use crate::metadata::RepositoryMetadata;

pub struct CachedGraphRepository {
    metadata: RepositoryMetadata,
    path: PathBuf,
}

impl CachedGraphRepository {
    pub fn new(metadata: RepositoryMetadata, path: impl AsRef<Path>) -> Self {
        Self {
            metadata,
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Repository for CachedGraphRepository {
    fn metadata(&self) -> Option<&RepositoryMetadata> {
        Some(&self.metadata)
    }

    fn get_graph(&self, ctx: &FetchContext) -> Result<Graph> {
        ctx.cancel.check()?;
        let graph = load_graph(&self.path)?;
        report_loaded(ctx, &self.metadata.name, &graph);
        Ok(graph)
    }
}
