//! Long-lived owner of a combined graph
//!
//! Replaces a process-global graph built at startup: the embedding program
//! constructs a [`GraphService`], hands it to whatever needs the graph, and
//! calls [`GraphService::refresh`] to rebuild.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use taubase_core::{Graph, GraphSummary};
use tracing::info;

use crate::cancel::CancellationToken;
use crate::drepo::{DistributedRepo, GraphRequest};
use crate::error::RepoError;

pub struct GraphService {
    repo: DistributedRepo,
    directory: Option<PathBuf>,
    current: RwLock<Arc<Graph>>,
}

impl GraphService {
    /// Load the graph, reusing the cache if present.
    pub fn start(
        repo: DistributedRepo,
        directory: Option<PathBuf>,
        cancel: &CancellationToken,
    ) -> Result<Self, RepoError> {
        let request = GraphRequest {
            directory: directory.clone(),
            allow_cache: true,
            use_progress: false,
        };
        let graph = repo.get_graph(&request, cancel)?;
        info!(
            "Graph service for {} started with {} nodes",
            repo.name(),
            graph.node_count()
        );
        Ok(GraphService {
            repo,
            directory,
            current: RwLock::new(Arc::new(graph)),
        })
    }

    pub fn repo(&self) -> &DistributedRepo {
        &self.repo
    }

    /// Snapshot of the current graph; unaffected by later refreshes.
    pub fn graph(&self) -> Arc<Graph> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn summary(&self) -> GraphSummary {
        self.graph().summary()
    }

    /// Rebuild from the providers, bypassing the cache, and swap the result in.
    /// On error the previous graph stays current.
    pub fn refresh(&self, cancel: &CancellationToken) -> Result<Arc<Graph>, RepoError> {
        let request = GraphRequest {
            directory: self.directory.clone(),
            allow_cache: false,
            use_progress: false,
        };
        let graph = Arc::new(self.repo.get_graph(&request, cancel)?);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = graph.clone();
        info!("Graph service for {} refreshed", self.repo.name());
        Ok(graph)
    }
}
