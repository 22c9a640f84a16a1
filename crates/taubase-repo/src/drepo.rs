//! The distributed repository: providers, union, metadata, cache, export

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError};
use std::time::Instant;

use rayon::prelude::*;
use taubase_core::{
    Graph, graph_cache_path, load_graph, remove_artifact, resolve_directory, should_use_cache,
    union,
};
use tracing::{debug, info};

use crate::cancel::CancellationToken;
use crate::error::RepoError;
use crate::export::{ExportPipeline, ExportReport};
use crate::lock;
use crate::metadata::CombinedMetadata;
use crate::providers::{FetchContext, Repository};

/// Inputs of one [`DistributedRepo::get_graph`] call.
///
/// `directory` only chooses where artifacts live; whether the cache is read
/// is decided by `allow_cache` alone.
#[derive(Debug, Clone, Default)]
pub struct GraphRequest {
    pub directory: Option<PathBuf>,
    pub allow_cache: bool,
    pub use_progress: bool,
}

impl GraphRequest {
    /// Use the cache when present.
    pub fn cached() -> Self {
        GraphRequest {
            allow_cache: true,
            ..Default::default()
        }
    }

    /// Always rebuild from the providers.
    pub fn fresh() -> Self {
        GraphRequest::default()
    }

    pub fn in_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn with_progress(mut self, use_progress: bool) -> Self {
        self.use_progress = use_progress;
        self
    }
}

/// Where the returned graph came from.
#[derive(Debug, Clone)]
pub enum GraphSource {
    /// Loaded from this artifact.
    Cache(PathBuf),
    /// Aggregated from the providers and exported.
    Built(ExportReport),
}

#[derive(Debug, Clone)]
pub struct GraphOutcome {
    pub graph: Graph,
    pub source: GraphSource,
}

impl GraphOutcome {
    pub fn from_cache(&self) -> bool {
        matches!(self.source, GraphSource::Cache(_))
    }
}

pub struct DistributedRepo {
    name: String,
    directory: Option<PathBuf>,
    repositories: Vec<Arc<dyn Repository>>,
    metadata: CombinedMetadata,
    pipeline: ExportPipeline,
    parallel: bool,
}

impl std::fmt::Debug for DistributedRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DistributedRepo")
            .field("name", &self.name)
            .field("directory", &self.directory)
            .field("repositories", &self.repositories.len())
            .field("metadata", &self.metadata)
            .field("parallel", &self.parallel)
            .finish()
    }
}

impl DistributedRepo {
    pub fn builder(name: impl Into<String>) -> DistributedRepoBuilder {
        DistributedRepoBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metadata(&self) -> &CombinedMetadata {
        &self.metadata
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub fn repositories(&self) -> &[Arc<dyn Repository>] {
        &self.repositories
    }

    pub fn pipeline(&self) -> &ExportPipeline {
        &self.pipeline
    }

    /// Fetch a fresh graph from every provider, in provider order.
    pub fn get_graphs(&self, ctx: &FetchContext) -> Result<Vec<(String, Graph)>, RepoError> {
        let fetch = |repo: &Arc<dyn Repository>| -> Result<(String, Graph), RepoError> {
            ctx.cancel.check()?;
            let name = repo
                .metadata()
                .map(|m| m.name.clone())
                .unwrap_or_default();
            let started = Instant::now();
            let graph = repo.get_graph(ctx).map_err(|cause| {
                if ctx.cancel.is_cancelled() {
                    RepoError::Cancelled
                } else {
                    RepoError::Provider {
                        name: name.clone(),
                        cause,
                    }
                }
            })?;
            ctx.cancel.check()?;
            debug!("Fetched {} in {:?}", name, started.elapsed());
            Ok((name, graph))
        };

        if self.parallel {
            self.repositories.par_iter().map(fetch).collect()
        } else {
            self.repositories.iter().map(fetch).collect()
        }
    }

    /// Return the combined graph, from the cache when allowed and present,
    /// otherwise rebuilt from every provider and exported.
    pub fn get_graph(
        &self,
        request: &GraphRequest,
        cancel: &CancellationToken,
    ) -> Result<Graph, RepoError> {
        self.load(request, cancel).map(|outcome| outcome.graph)
    }

    /// Shorthand for [`get_graph`](Self::get_graph) without cancellation or progress.
    pub fn get_graph_in(
        &self,
        directory: Option<&Path>,
        use_cached: bool,
    ) -> Result<Graph, RepoError> {
        let request = GraphRequest {
            directory: directory.map(Path::to_path_buf),
            allow_cache: use_cached,
            use_progress: false,
        };
        self.get_graph(&request, &CancellationToken::new())
    }

    /// Like [`get_graph`](Self::get_graph), also reporting whether the cache was hit
    /// and which files a rebuild wrote.
    pub fn load(
        &self,
        request: &GraphRequest,
        cancel: &CancellationToken,
    ) -> Result<GraphOutcome, RepoError> {
        let directory = resolve_directory(request.directory.as_deref(), self.directory.as_deref())?;
        let primary = graph_cache_path(&directory, &self.name);

        let handle = lock::handle(&directory, &self.name);
        let _guard = handle.lock().unwrap_or_else(PoisonError::into_inner);

        if should_use_cache(request.allow_cache, primary.exists()) {
            info!("Loading {} from cache: {}", self.name, primary.display());
            let graph = load_graph(&primary)?;
            return Ok(GraphOutcome {
                graph,
                source: GraphSource::Cache(primary),
            });
        }

        let started = Instant::now();
        info!(
            "Aggregating {} repositories into {}",
            self.repositories.len(),
            self.name
        );
        let ctx = FetchContext {
            use_progress: request.use_progress,
            cancel: cancel.clone(),
        };
        let graphs = self.get_graphs(&ctx)?;

        let mut graph = union(graphs.into_iter().map(|(_, graph)| graph));
        self.metadata.apply(&mut graph);
        info!(
            "Combined graph {}: {} nodes, {} edges",
            self.name,
            graph.node_count(),
            graph.edge_count()
        );

        let report = self.pipeline.export(&graph, &directory, &self.name, cancel)?;
        info!("Built {} in {:?}", self.name, started.elapsed());
        Ok(GraphOutcome {
            graph,
            source: GraphSource::Built(report),
        })
    }

    /// Extract causal statements from the combined graph.
    #[cfg(feature = "statements")]
    pub fn statements(
        &self,
        request: &GraphRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<taubase_core::io::statements::Statement>, RepoError> {
        let graph = self.get_graph(request, cancel)?;
        Ok(taubase_core::io::statements::to_statements(&graph))
    }

    #[cfg(not(feature = "statements"))]
    pub fn statements(
        &self,
        _request: &GraphRequest,
        _cancel: &CancellationToken,
    ) -> Result<Vec<std::convert::Infallible>, RepoError> {
        Err(RepoError::Unavailable(
            "statement extraction requires the statements feature".to_string(),
        ))
    }

    /// Remove every artifact this repository may have written. Returns how many were removed.
    pub fn clear(&self, directory: Option<&Path>) -> Result<usize, RepoError> {
        let directory = resolve_directory(directory, self.directory.as_deref())?;
        let handle = lock::handle(&directory, &self.name);
        let _guard = handle.lock().unwrap_or_else(PoisonError::into_inner);

        let mut removed = 0;
        for path in self.pipeline.artifact_paths(&directory, &self.name) {
            if remove_artifact(&path)? {
                debug!("Removed {}", path.display());
                removed += 1;
            }
        }
        Ok(removed)
    }
}

/// Collects providers and settings; validation happens in [`build`](Self::build).
pub struct DistributedRepoBuilder {
    name: String,
    version: Option<String>,
    directory: Option<PathBuf>,
    repositories: Vec<Arc<dyn Repository>>,
    pipeline: ExportPipeline,
    parallel: bool,
}

impl DistributedRepoBuilder {
    fn new(name: impl Into<String>) -> Self {
        DistributedRepoBuilder {
            name: name.into(),
            version: None,
            directory: None,
            repositories: Vec::new(),
            pipeline: ExportPipeline::standard(),
            parallel: true,
        }
    }

    /// Release version of the aggregate itself.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Default artifact directory.
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn repository(mut self, repository: Arc<dyn Repository>) -> Self {
        self.repositories.push(repository);
        self
    }

    pub fn repositories<I>(mut self, repositories: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Repository>>,
    {
        self.repositories.extend(repositories);
        self
    }

    pub fn pipeline(mut self, pipeline: ExportPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Fetch provider graphs on the rayon pool (default) or one after another.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validate the providers and combine their metadata. No graph is fetched.
    pub fn build(self) -> Result<DistributedRepo, RepoError> {
        if self.name.trim().is_empty() {
            return Err(RepoError::Configuration(
                "a distributed repository needs a name".to_string(),
            ));
        }
        if self.repositories.is_empty() {
            return Err(RepoError::Configuration(format!(
                "{} has no repositories",
                self.name
            )));
        }

        let mut members = Vec::with_capacity(self.repositories.len());
        let mut seen = HashSet::new();
        for (position, repo) in self.repositories.iter().enumerate() {
            let metadata = repo.metadata().ok_or_else(|| {
                RepoError::Configuration(format!(
                    "repository #{} of {} has no metadata",
                    position + 1,
                    self.name
                ))
            })?;
            if !seen.insert(metadata.name.as_str()) {
                return Err(RepoError::Configuration(format!(
                    "repository {} appears more than once in {}",
                    metadata.name, self.name
                )));
            }
            members.push(metadata);
        }

        let metadata = CombinedMetadata::combine(&self.name, self.version.as_deref(), members);
        debug!("{} version {}", self.name, metadata.version);

        Ok(DistributedRepo {
            name: self.name,
            directory: self.directory,
            repositories: self.repositories,
            metadata,
            pipeline: self.pipeline,
            parallel: self.parallel,
        })
    }
}
