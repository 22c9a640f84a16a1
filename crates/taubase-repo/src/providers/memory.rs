//! In-memory provider for graphs built by the embedding program

use anyhow::Result;
use taubase_core::Graph;

use super::{FetchContext, Repository};
use crate::metadata::RepositoryMetadata;

/// Hands out a copy of a fixed graph on every fetch.
pub struct StaticRepository {
    metadata: Option<RepositoryMetadata>,
    graph: Graph,
}

impl StaticRepository {
    pub fn new(metadata: RepositoryMetadata, graph: Graph) -> Self {
        Self {
            metadata: Some(metadata),
            graph,
        }
    }

    /// A provider that cannot join an aggregate.
    pub fn without_metadata(graph: Graph) -> Self {
        Self {
            metadata: None,
            graph,
        }
    }
}

impl Repository for StaticRepository {
    fn metadata(&self) -> Option<&RepositoryMetadata> {
        self.metadata.as_ref()
    }

    fn get_graph(&self, ctx: &FetchContext) -> Result<Graph> {
        ctx.cancel.check()?;
        Ok(self.graph.clone())
    }
}
