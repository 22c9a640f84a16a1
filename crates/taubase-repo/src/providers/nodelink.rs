//! Provider reading a node-link JSON export

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use taubase_core::Graph;
use taubase_core::io::from_nodelink;

use super::{FetchContext, Repository, report_loaded};
use crate::metadata::RepositoryMetadata;

pub struct NodeLinkRepository {
    metadata: RepositoryMetadata,
    path: PathBuf,
}

impl NodeLinkRepository {
    pub fn new(metadata: RepositoryMetadata, path: impl AsRef<Path>) -> Self {
        Self {
            metadata,
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Repository for NodeLinkRepository {
    fn metadata(&self) -> Option<&RepositoryMetadata> {
        Some(&self.metadata)
    }

    fn get_graph(&self, ctx: &FetchContext) -> Result<Graph> {
        ctx.cancel.check()?;
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        let graph = from_nodelink(BufReader::new(file))
            .with_context(|| format!("Failed to parse node-link JSON in {}", self.path.display()))?;
        report_loaded(ctx, &self.metadata.name, &graph);
        Ok(graph)
    }
}
